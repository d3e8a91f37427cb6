//! The open case plus its unsaved-changes flag and file path.
//!
//! Every content mutation goes through [`Document`] so the dirty flag can't be
//! bypassed. Operations that would drop the current case (new, open, close)
//! first ask a [`DocumentPrompt`] whether to save, discard, or cancel.

use crate::case_file;
use crate::error::Result;
use crate::statics;
use crate::timefmt::{format_time, note_stamp};
use crate::{CaseRecord, TableKind};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Clean,
    Dirty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

/// User interaction the document needs but does not own.
pub trait DocumentPrompt {
    /// Asked when unsaved changes would be lost.
    fn confirm_discard(&mut self) -> SaveChoice;
    /// `None` means the user backed out.
    fn pick_save_path(&mut self, suggested_name: &str) -> Option<PathBuf>;
    fn pick_open_path(&mut self) -> Option<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct Document {
    case: CaseRecord,
    path: Option<PathBuf>,
    dirty: bool,
    case_extension: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            case: CaseRecord::default(),
            path: None,
            dirty: false,
            case_extension: statics::CASE_EXTENSION.to_string(),
        }
    }

    /// Extension appended to save paths chosen without one.
    pub fn with_case_extension(mut self, ext: &str) -> Self {
        self.case_extension = ext.trim_start_matches('.').to_string();
        self
    }

    pub fn case(&self) -> &CaseRecord {
        &self.case
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn state(&self) -> DocumentState {
        if self.dirty {
            DocumentState::Dirty
        } else {
            DocumentState::Clean
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn set_case_name(&mut self, text: impl Into<String>) {
        self.case.case_name = text.into();
        self.mark_dirty();
    }

    pub fn set_subject_target(&mut self, text: impl Into<String>) {
        self.case.subject_target = text.into();
        self.mark_dirty();
    }

    pub fn set_notes(&mut self, text: impl Into<String>) {
        self.case.notes = text.into();
        self.mark_dirty();
    }

    /// Inserts `[HH:MM:SS] ` at `char_offset` (clamped to the end of the notes).
    /// Returns the char offset just past the inserted stamp.
    pub fn insert_note_stamp(&mut self, position_ms: u64, char_offset: Option<usize>) -> usize {
        let stamp = note_stamp(position_ms);
        let notes = &mut self.case.notes;
        let char_len = notes.chars().count();
        let at = char_offset.unwrap_or(char_len).min(char_len);
        let byte_at = notes
            .char_indices()
            .nth(at)
            .map_or(notes.len(), |(i, _)| i);
        notes.insert_str(byte_at, &stamp);
        self.mark_dirty();
        at + stamp.chars().count()
    }

    pub fn append_row<I, S>(&mut self, kind: TableKind, cells: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let idx = self.case.table_mut(kind).append_row(cells);
        self.mark_dirty();
        idx
    }

    /// Adds a row pre-filled the way the add buttons do: entities and events
    /// get the playback position in their first column, resources get the
    /// access date in their last.
    pub fn add_stamped_row(&mut self, kind: TableKind, position_ms: u64, accessed: &str) -> usize {
        let mut cells = vec![String::new(); kind.column_count()];
        match kind {
            TableKind::Entities | TableKind::Events => cells[0] = format_time(position_ms),
            TableKind::Resources => cells[2] = accessed.to_string(),
        }
        self.append_row(kind, cells)
    }

    pub fn set_cell(
        &mut self,
        kind: TableKind,
        row: usize,
        col: usize,
        text: impl Into<String>,
    ) -> Result<()> {
        self.case.table_mut(kind).set_cell(row, col, text)?;
        self.mark_dirty();
        Ok(())
    }

    /// Removes rows by index. Only marks the document dirty if a row actually went away.
    pub fn remove_rows(&mut self, kind: TableKind, indices: &BTreeSet<usize>) -> usize {
        if indices.is_empty() {
            return 0;
        }
        let removed = self.case.table_mut(kind).remove_rows(indices);
        debug!(table = ?kind, removed, "removed rows");
        if removed > 0 {
            self.mark_dirty();
        }
        removed
    }

    /// Writes to `path` and makes it the current target.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        case_file::write_file(&self.case, path)?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Saves to the current path, or asks for one. `Ok(false)` if the user backed out.
    pub fn save(&mut self, prompt: &mut dyn DocumentPrompt) -> Result<bool> {
        match self.path.clone() {
            Some(path) => {
                self.save_to(&path)?;
                Ok(true)
            }
            None => self.save_as(prompt),
        }
    }

    pub fn save_as(&mut self, prompt: &mut dyn DocumentPrompt) -> Result<bool> {
        let Some(path) = prompt.pick_save_path(&self.suggested_file_name()) else {
            return Ok(false);
        };
        let path = case_file::ensure_extension(&path, &self.case_extension);
        self.save_to(&path)?;
        Ok(true)
    }

    /// Replaces the case with the file at `path`. On error nothing changes.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let case = case_file::read_file(path)?;
        self.case = case;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Resets to an empty case without asking.
    pub fn reset(&mut self) {
        self.case = CaseRecord::default();
        self.path = None;
        self.dirty = false;
        info!("new case");
    }

    /// Asks before losing unsaved changes. `Ok(true)` means the caller may proceed.
    pub fn maybe_save(&mut self, prompt: &mut dyn DocumentPrompt) -> Result<bool> {
        if !self.dirty {
            return Ok(true);
        }
        match prompt.confirm_discard() {
            SaveChoice::Save => self.save(prompt),
            SaveChoice::Discard => Ok(true),
            SaveChoice::Cancel => Ok(false),
        }
    }

    pub fn request_new_case(&mut self, prompt: &mut dyn DocumentPrompt) -> Result<bool> {
        if !self.maybe_save(prompt)? {
            return Ok(false);
        }
        self.reset();
        Ok(true)
    }

    /// Guarded open. `Ok(false)` when cancelled at either the save prompt or the file picker.
    pub fn request_open(&mut self, prompt: &mut dyn DocumentPrompt) -> Result<bool> {
        if !self.maybe_save(prompt)? {
            return Ok(false);
        }
        let Some(path) = prompt.pick_open_path() else {
            return Ok(false);
        };
        self.load(&path)?;
        Ok(true)
    }

    pub fn request_close(&mut self, prompt: &mut dyn DocumentPrompt) -> Result<bool> {
        self.maybe_save(prompt)
    }

    /// Writes one table as CSV. Exporting does not touch the dirty flag.
    pub fn export_table(&self, kind: TableKind, path: &Path) -> Result<()> {
        case_file::write_csv_file(self.case.table(kind), path)
    }

    pub fn default_export_file_name(&self, kind: TableKind) -> String {
        case_file::default_export_file_name(&self.case.case_name, kind)
    }

    fn display_name(&self) -> String {
        if !self.case.case_name.is_empty() {
            return self.case.case_name.clone();
        }
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| statics::EN_UNTITLED_CASE.to_string())
    }

    fn suggested_file_name(&self) -> String {
        if let Some(name) = self.path.as_deref().and_then(Path::file_name) {
            return name.to_string_lossy().into_owned();
        }
        format!("{}.{}", self.display_name(), self.case_extension)
    }

    /// `<case name | file name | Untitled Case>[*] - Data Organizer`
    pub fn window_title(&self) -> String {
        let marker = if self.dirty { "*" } else { "" };
        format!("{}{marker} - {}", self.display_name(), statics::EN_APP_TITLE)
    }
}
