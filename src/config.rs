//! Optional application settings, read from a JSON file.

use crate::error::{CaseError, Result};
use crate::media::MediaFilter;
use crate::statics;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// `tracing` filter used when neither CLI flags nor `RUST_LOG` set one
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Extension given to saved case files
    #[serde(default = "default_case_extension")]
    pub case_extension: String,

    /// Starting directory for file dialogs
    #[serde(default)]
    pub dialog_dir: Option<PathBuf>,

    #[serde(default = "default_window_size")]
    pub window_size: [f32; 2],
}

fn default_log_filter() -> String { "info".to_string() }
fn default_case_extension() -> String { statics::CASE_EXTENSION.to_string() }
fn default_window_size() -> [f32; 2] { [1280.0, 800.0] }

fn default_video_extensions() -> Vec<String> {
    statics::DEFAULT_VIDEO_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_image_extensions() -> Vec<String> {
    statics::DEFAULT_IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            video_extensions: default_video_extensions(),
            image_extensions: default_image_extensions(),
            case_extension: default_case_extension(),
            dialog_dir: None,
            window_size: default_window_size(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CaseError::io(path, e))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| CaseError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        let ext = self.case_extension.trim_start_matches('.');
        if ext.is_empty() || ext.contains(['/', '\\']) {
            return Err(CaseError::Config(format!(
                "invalid case_extension `{}`",
                self.case_extension
            )));
        }
        if self.window_size.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(CaseError::Config("window_size must be positive".into()));
        }
        Ok(())
    }

    pub fn case_extension(&self) -> &str {
        self.case_extension.trim_start_matches('.')
    }

    pub fn media_filter(&self) -> MediaFilter {
        MediaFilter::new(&self.video_extensions, &self.image_extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use crate::media::MediaKind;
    use std::path::Path;

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "log_filter": "debug", "video_extensions": ["webm"] }"#)
            .expect("write config");

        let config = AppConfig::load(&path).expect("load");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.case_extension(), "osintcase");
        assert_eq!(
            config.media_filter().classify(Path::new("x.webm")),
            Some(MediaKind::Video)
        );
        assert_eq!(config.media_filter().classify(Path::new("x.mp4")), None);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load_or_default(&dir.path().join("absent.json")).expect("defaults");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn rejects_bad_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "case_extension": "." }"#).expect("write config");
        assert!(AppConfig::load(&path).is_err());
    }
}
