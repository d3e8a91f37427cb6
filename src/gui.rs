use crate::media::{MediaFilter, MediaKind, PlaybackClock, WallClock};
use crate::timefmt::format_time;
use crate::{AppConfig, Document, DocumentPrompt, SaveChoice, TableKind, case_file, statics};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::{
    collections::{BTreeSet, HashMap},
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{info, warn};

pub fn run_gui(config: AppConfig, open: Option<PathBuf>) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.window_size),
        ..Default::default()
    };
    eframe::run_native(
        statics::EN_APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(OrganizerApp::new(config, open)))),
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum Tab {
    #[default]
    Notes,
    Log(TableKind),
}

#[derive(Clone, Debug)]
struct LoadedMedia {
    path: PathBuf,
    kind: MediaKind,
}

/// Native dialogs behind the document's save/discard/cancel and path questions.
struct RfdPrompt {
    dialog_dir: Option<PathBuf>,
    case_extension: String,
}

impl RfdPrompt {
    fn file_dialog(&self) -> rfd::FileDialog {
        let mut dlg = rfd::FileDialog::new();
        if let Some(dir) = self.dialog_dir.clone() {
            dlg = dlg.set_directory(dir);
        }
        dlg
    }
}

impl DocumentPrompt for RfdPrompt {
    fn confirm_discard(&mut self) -> SaveChoice {
        let answer = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(statics::EN_APP_TITLE)
            .set_description(statics::EN_PROMPT_MODIFIED)
            .set_buttons(rfd::MessageButtons::YesNoCancel)
            .show();
        match answer {
            rfd::MessageDialogResult::Yes => SaveChoice::Save,
            rfd::MessageDialogResult::No => SaveChoice::Discard,
            _ => SaveChoice::Cancel,
        }
    }

    fn pick_save_path(&mut self, suggested_name: &str) -> Option<PathBuf> {
        self.file_dialog()
            .add_filter(statics::EN_FILTER_CASE, &[self.case_extension.as_str()])
            .add_filter(statics::EN_FILTER_ALL, &["*"])
            .set_file_name(suggested_name)
            .save_file()
    }

    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.file_dialog()
            .add_filter(
                statics::EN_FILTER_CASE,
                open_filter_extensions(&self.case_extension).as_slice(),
            )
            .add_filter(statics::EN_FILTER_ALL, &["*"])
            .pick_file()
    }
}

fn open_filter_extensions(case_extension: &str) -> Vec<&str> {
    let mut exts = vec![case_extension];
    if case_extension != "json" {
        exts.push("json");
    }
    exts
}

/// The picked export target, with `.csv` added when no extension was typed.
fn export_path(chosen: &Path) -> PathBuf {
    case_file::ensure_extension(chosen, statics::CSV_EXTENSION)
}

fn media_time_label(position_ms: u64, duration_ms: Option<u64>) -> String {
    let total = duration_ms.map_or_else(|| statics::EN_TIME_PLACEHOLDER.to_string(), format_time);
    format!("{} / {total}", format_time(position_ms))
}

struct OrganizerApp {
    doc: Document,
    config: AppConfig,
    media_filter: MediaFilter,
    dialog_dir: Option<PathBuf>,

    media: Option<LoadedMedia>,
    clock: WallClock,

    tab: Tab,
    selected_rows: HashMap<TableKind, BTreeSet<usize>>,
    // (table, row, col) to focus once the freshly added row is drawn.
    pending_focus: Option<(TableKind, usize, usize)>,

    status: String,
    last_error: Option<String>,
    allow_close: bool,
    last_title: String,
}

impl OrganizerApp {
    fn new(config: AppConfig, open: Option<PathBuf>) -> Self {
        let mut app = Self {
            doc: Document::new().with_case_extension(config.case_extension()),
            media_filter: config.media_filter(),
            dialog_dir: config.dialog_dir.clone(),
            config,
            media: None,
            clock: WallClock::default(),
            tab: Tab::default(),
            selected_rows: HashMap::new(),
            pending_focus: None,
            status: statics::EN_STATUS_READY.to_string(),
            last_error: None,
            allow_close: false,
            last_title: String::new(),
        };
        if let Some(path) = open {
            app.load_path(&path);
        }
        app
    }

    fn prompt(&self) -> RfdPrompt {
        RfdPrompt {
            dialog_dir: self.dialog_dir.clone(),
            case_extension: self.config.case_extension().to_string(),
        }
    }

    fn report_error(&mut self, what: &str, err: impl std::fmt::Display) {
        warn!("{what}: {err}");
        self.last_error = Some(format!("{what}: {err}"));
    }

    fn remember_dir(&mut self, path: &Path) {
        self.dialog_dir = path.parent().map(PathBuf::from);
    }

    /// Drops per-case UI state after the document was replaced.
    fn reset_view(&mut self) {
        self.media = None;
        self.clock = WallClock::default();
        self.selected_rows.clear();
        self.pending_focus = None;
        self.last_error = None;
    }

    fn load_path(&mut self, path: &Path) {
        match self.doc.load(path) {
            Ok(()) => {
                self.reset_view();
                self.remember_dir(path);
                self.status = format!("Case loaded successfully: {}", path.display());
            }
            Err(e) => self.report_error("Failed to load the case file", e),
        }
    }

    fn new_case(&mut self) {
        let mut prompt = self.prompt();
        match self.doc.request_new_case(&mut prompt) {
            Ok(true) => {
                self.reset_view();
                self.status = statics::EN_STATUS_NEW_CASE.to_string();
            }
            Ok(false) => {}
            Err(e) => self.report_error("Failed to save", e),
        }
    }

    fn open_case(&mut self) {
        let mut prompt = self.prompt();
        match self.doc.request_open(&mut prompt) {
            Ok(true) => {
                self.reset_view();
                if let Some(path) = self.doc.path().map(Path::to_path_buf) {
                    self.remember_dir(&path);
                    self.status = format!("Case loaded successfully: {}", path.display());
                }
            }
            Ok(false) => {}
            Err(e) => self.report_error("Failed to open", e),
        }
    }

    fn after_save(&mut self, saved: bool) {
        if !saved {
            return;
        }
        if let Some(path) = self.doc.path().map(Path::to_path_buf) {
            self.remember_dir(&path);
            self.status = format!("Case saved successfully: {}", path.display());
        }
        self.last_error = None;
    }

    fn save_case(&mut self) {
        let mut prompt = self.prompt();
        match self.doc.save(&mut prompt) {
            Ok(saved) => self.after_save(saved),
            Err(e) => self.report_error("Failed to save", e),
        }
    }

    fn save_case_as(&mut self) {
        let mut prompt = self.prompt();
        match self.doc.save_as(&mut prompt) {
            Ok(saved) => self.after_save(saved),
            Err(e) => self.report_error("Failed to save", e),
        }
    }

    fn export_table(&mut self, kind: TableKind) {
        let dlg = self
            .prompt()
            .file_dialog()
            .add_filter(statics::EN_FILTER_CSV, &[statics::CSV_EXTENSION])
            .add_filter(statics::EN_FILTER_ALL, &["*"])
            .set_file_name(self.doc.default_export_file_name(kind));
        let Some(path) = dlg.save_file() else {
            return;
        };
        let path = export_path(&path);

        match self.doc.export_table(kind, &path) {
            Ok(()) => {
                self.remember_dir(&path);
                self.status = format!("Data exported successfully to {}", path.display());
                self.last_error = None;
            }
            Err(e) => self.report_error("Export failed", e),
        }
    }

    fn open_media(&mut self) {
        let exts = self.media_filter.all_extensions();
        let mut dlg = rfd::FileDialog::new()
            .add_filter(statics::EN_FILTER_MEDIA, exts.as_slice())
            .add_filter(statics::EN_MEDIA_VIDEO, self.media_filter.video_extensions())
            .add_filter(statics::EN_MEDIA_IMAGE, self.media_filter.image_extensions())
            .add_filter(statics::EN_FILTER_ALL, &["*"]);
        if let Some(dir) = self.dialog_dir.clone() {
            dlg = dlg.set_directory(dir);
        }
        let Some(path) = dlg.pick_file() else {
            return;
        };

        let Some(kind) = self.media_filter.classify(&path) else {
            self.report_error(statics::EN_MEDIA_UNSUPPORTED, path.display());
            return;
        };

        info!(path = %path.display(), ?kind, "opened media");
        self.clock = WallClock::default();
        if kind == MediaKind::Video {
            self.clock.play();
        }
        self.status = format!("Opened {}", path.display());
        self.media = Some(LoadedMedia { path, kind });
    }

    fn has_video(&self) -> bool {
        matches!(
            self.media,
            Some(LoadedMedia {
                kind: MediaKind::Video,
                ..
            })
        )
    }

    fn add_stamped_row(&mut self, kind: TableKind) {
        let accessed = chrono::Local::now()
            .format(statics::DATE_ACCESSED_FORMAT)
            .to_string();
        let row = self
            .doc
            .add_stamped_row(kind, self.clock.position_ms(), &accessed);
        self.pending_focus = Some((kind, row, kind.edit_column()));
        self.tab = Tab::Log(kind);
    }

    fn add_note_stamp(&mut self) {
        self.doc.insert_note_stamp(self.clock.position_ms(), None);
        self.tab = Tab::Notes;
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let ctrl_shift = egui::Modifiers {
            shift: true,
            ..egui::Modifiers::CTRL
        };
        let mut save_as = false;
        let mut save = false;
        let mut new = false;
        let mut open = false;
        let mut stamp = false;
        ctx.input_mut(|i| {
            save_as = i.consume_key(ctrl_shift, egui::Key::S);
            save = i.consume_key(egui::Modifiers::CTRL, egui::Key::S);
            new = i.consume_key(egui::Modifiers::CTRL, egui::Key::N);
            open = i.consume_key(egui::Modifiers::CTRL, egui::Key::O);
            stamp = i.consume_key(egui::Modifiers::CTRL, egui::Key::T);
        });
        if save_as {
            self.save_case_as();
        } else if save {
            self.save_case();
        }
        if new {
            self.new_case();
        }
        if open {
            self.open_case();
        }
        if stamp {
            self.add_note_stamp();
        }
    }

    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) || self.allow_close {
            return;
        }
        let mut prompt = self.prompt();
        match self.doc.request_close(&mut prompt) {
            Ok(true) => self.allow_close = true,
            Ok(false) => ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose),
            Err(e) => {
                self.report_error("Failed to save", e);
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            }
        }
    }

    fn render_menu(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button(statics::EN_MENU_FILE, |ui| {
                if ui.button(statics::EN_BTN_NEW_CASE).clicked() {
                    self.new_case();
                }
                if ui.button(statics::EN_BTN_OPEN_CASE).clicked() {
                    self.open_case();
                }
                ui.separator();
                if ui.button(statics::EN_BTN_SAVE).clicked() {
                    self.save_case();
                }
                if ui.button(statics::EN_BTN_SAVE_AS).clicked() {
                    self.save_case_as();
                }
                ui.separator();
                if ui.button(statics::EN_BTN_EXIT).clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
            ui.menu_button(statics::EN_MENU_EXPORT, |ui| {
                for (kind, label) in [
                    (TableKind::Entities, statics::EN_BTN_EXPORT_ENTITIES),
                    (TableKind::Events, statics::EN_BTN_EXPORT_EVENTS),
                    (TableKind::Resources, statics::EN_BTN_EXPORT_RESOURCES),
                ] {
                    if ui.button(label).clicked() {
                        self.export_table(kind);
                    }
                }
            });

            if !self.status.is_empty() {
                ui.separator();
                ui.label(&self.status);
            }
        });
    }

    fn render_media_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading(statics::EN_HEADING_MEDIA);
        ui.separator();
        if ui.button(statics::EN_BTN_OPEN_MEDIA).clicked() {
            self.open_media();
        }
        ui.add_space(8.0);

        match &self.media {
            None => {
                ui.label(statics::EN_MEDIA_NONE);
            }
            Some(media) => {
                let kind_label = match media.kind {
                    MediaKind::Video => statics::EN_MEDIA_VIDEO,
                    MediaKind::Image => statics::EN_MEDIA_IMAGE,
                };
                let name = media
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                ui.label(format!("{kind_label}: {name}"))
                    .on_hover_text(media.path.display().to_string());
            }
        }
        ui.add_space(8.0);

        let has_video = self.has_video();
        ui.add_enabled_ui(has_video, |ui| {
            ui.horizontal(|ui| {
                let label = if self.clock.is_playing() {
                    statics::EN_BTN_PAUSE
                } else {
                    statics::EN_BTN_PLAY
                };
                if ui.button(label).clicked() {
                    self.clock.toggle();
                }
                ui.label(media_time_label(
                    self.clock.position_ms(),
                    self.clock.duration_ms(),
                ));
            });

            let mut position = self.clock.position_ms();
            let max = self
                .clock
                .duration_ms()
                .unwrap_or_else(|| position.max(3_600_000));
            let resp = ui.add(egui::Slider::new(&mut position, 0..=max).show_value(false));
            if resp.changed() {
                self.clock.seek(position);
            }
        });
    }

    fn render_case_info(&mut self, ui: &mut egui::Ui) {
        ui.heading(statics::EN_HEADING_CASE_INFO);
        egui::Grid::new("case_info_grid")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label(statics::EN_LABEL_CASE_NAME);
                let mut name = self.doc.case().case_name.clone();
                if ui.text_edit_singleline(&mut name).changed() {
                    self.doc.set_case_name(name);
                }
                ui.end_row();

                ui.label(statics::EN_LABEL_SUBJECT_TARGET);
                let mut subject = self.doc.case().subject_target.clone();
                if ui.text_edit_singleline(&mut subject).changed() {
                    self.doc.set_subject_target(subject);
                }
                ui.end_row();
            });
    }

    fn render_notes(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(statics::EN_BTN_ADD_TIMESTAMP).clicked() {
                self.add_note_stamp();
            }
        });
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut notes = self.doc.case().notes.clone();
                let resp = ui.add(
                    egui::TextEdit::multiline(&mut notes)
                        .hint_text(statics::EN_HINT_NOTES)
                        .desired_width(f32::INFINITY)
                        .desired_rows(24),
                );
                if resp.changed() {
                    self.doc.set_notes(notes);
                }
            });
    }

    fn render_log(&mut self, ui: &mut egui::Ui, kind: TableKind) {
        let mut selected = self.selected_rows.remove(&kind).unwrap_or_default();

        ui.horizontal(|ui| {
            let add_label = match kind {
                TableKind::Entities => statics::EN_BTN_ADD_ENTITY,
                TableKind::Events => statics::EN_BTN_LOG_EVENT,
                TableKind::Resources => statics::EN_BTN_ADD_RESOURCE,
            };
            if ui.button(add_label).clicked() {
                self.add_stamped_row(kind);
            }
            if ui
                .add_enabled(
                    !selected.is_empty(),
                    egui::Button::new(statics::EN_BTN_REMOVE_SELECTED),
                )
                .clicked()
            {
                self.doc.remove_rows(kind, &selected);
                selected.clear();
            }
        });
        ui.separator();

        let headers = kind.headers();
        let rows = self.doc.case().table(kind).to_rows();
        let focus = self
            .pending_focus
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, r, c)| (r, c));
        let mut edits: Vec<(usize, usize, String)> = Vec::new();
        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 8.0;

        ui.push_id(kind.json_key(), |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(28.0).resizable(false))
                .columns(Column::remainder().resizable(true).clip(true), headers.len())
                .header(row_h, |mut header| {
                    header.col(|ui| {
                        ui.strong("");
                    });
                    for h in headers {
                        header.col(|ui| {
                            ui.strong(*h);
                        });
                    }
                })
                .body(|mut body| {
                    for (r, cells) in rows.iter().enumerate() {
                        body.row(row_h, |mut row| {
                            row.col(|ui| {
                                let mut on = selected.contains(&r);
                                if ui.checkbox(&mut on, "").changed() {
                                    if on {
                                        selected.insert(r);
                                    } else {
                                        selected.remove(&r);
                                    }
                                }
                            });
                            for (c, cell) in cells.iter().enumerate() {
                                row.col(|ui| {
                                    let mut text = cell.clone();
                                    let resp = ui.add(
                                        egui::TextEdit::singleline(&mut text)
                                            .desired_width(ui.available_width()),
                                    );
                                    if focus == Some((r, c)) {
                                        resp.request_focus();
                                        resp.scroll_to_me(Some(egui::Align::Max));
                                    }
                                    if resp.changed() {
                                        edits.push((r, c, text));
                                    }
                                });
                            }
                        });
                    }
                });
        });

        if focus.is_some() {
            self.pending_focus = None;
        }
        for (r, c, text) in edits {
            if let Err(e) = self.doc.set_cell(kind, r, c, text) {
                warn!("dropping cell edit: {e}");
            }
        }
        self.selected_rows.insert(kind, selected);
    }
}

impl eframe::App for OrganizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        self.handle_close_request(ctx);

        let title = self.doc.window_title();
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.render_menu(ctx, ui);
        });

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        // Shown before the side/central panels so it spans the full width.
        egui::TopBottomPanel::bottom("bottom_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let file_label = self
                    .doc
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| statics::EN_PLACEHOLDER_UNSAVED.to_string());
                ui.label(file_label);
                for kind in TableKind::ALL {
                    ui.separator();
                    ui.label(format!(
                        "{}: {}",
                        kind.title(),
                        self.doc.case().table(kind).len()
                    ));
                }
                if self.doc.is_dirty() {
                    ui.separator();
                    ui.colored_label(egui::Color32::YELLOW, statics::EN_BADGE_MODIFIED);
                }
            });
        });

        egui::SidePanel::left("media_panel")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                self.render_media_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_case_info(ui);
            ui.separator();

            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Notes, statics::EN_TAB_NOTES);
                for kind in TableKind::ALL {
                    ui.selectable_value(&mut self.tab, Tab::Log(kind), kind.title());
                }
            });
            ui.separator();

            match self.tab {
                Tab::Notes => self.render_notes(ui),
                Tab::Log(kind) => self.render_log(ui, kind),
            }
        });

        if self.clock.is_playing() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
