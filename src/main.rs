//! Data Organizer launcher: opens the GUI, or exports a case table headlessly.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use data_organizer::{AppConfig, TableKind, case_file, statics};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "data-organizer")]
#[command(version)]
#[command(about = "Case notes, entity/event/resource logs and media side by side", long_about = None)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Case file to open on startup
    case: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write one table of a case file as CSV
    Export {
        /// Case file to read
        case: PathBuf,

        /// Which table to export
        #[arg(short, long, value_enum)]
        table: TableArg,

        /// Output path (defaults to `<case name>_<table>.csv` next to the case)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TableArg {
    Entities,
    Events,
    Resources,
}

impl From<TableArg> for TableKind {
    fn from(value: TableArg) -> Self {
        match value {
            TableArg::Entities => TableKind::Entities,
            TableArg::Events => TableKind::Events,
            TableArg::Resources => TableKind::Resources,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(statics::DEFAULT_CONFIG_FILE));
    let config = if cli.config.is_some() {
        AppConfig::load(&config_path)
    } else {
        AppConfig::load_or_default(&config_path)
    }
    .with_context(|| format!("loading config {config_path:?}"))?;

    init_tracing(&cli, &config);

    match cli.command {
        Some(Commands::Export {
            case,
            table,
            output,
        }) => export(&case, table.into(), output.as_deref()),
        None => {
            info!(version = env!("CARGO_PKG_VERSION"), "starting GUI");
            if let Err(e) = data_organizer::run_gui(config, cli.case) {
                bail!("GUI failed: {e}");
            }
            Ok(())
        }
    }
}

fn init_tracing(cli: &Cli, config: &AppConfig) {
    let flag_level = if cli.trace {
        Some("trace")
    } else if cli.verbose {
        Some("debug")
    } else if cli.quiet {
        Some("warn")
    } else {
        None
    };

    let filter = match flag_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn export(case_path: &Path, kind: TableKind, output: Option<&Path>) -> anyhow::Result<()> {
    let case = case_file::read_file(case_path)
        .with_context(|| format!("reading case {case_path:?}"))?;

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => {
            let name = case_file::default_export_file_name(&case.case_name, kind);
            case_path.with_file_name(name)
        }
    };

    case_file::write_csv_file(case.table(kind), &output)
        .with_context(|| format!("writing {output:?}"))?;
    println!("{}", output.display());
    Ok(())
}
