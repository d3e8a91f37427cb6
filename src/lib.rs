//! Core library for Data Organizer.
//! Holds the case record, its three logs, JSON persistence with CSV export, and
//! the document state that gates destructive actions behind a save prompt.
//! The egui shell in `gui` only forwards events into [`Document`].

mod case;
pub mod case_file;
pub mod config;
mod document;
mod error;
mod gui;
pub mod media;
pub mod statics;
mod table;
pub mod timefmt;

pub use case::CaseRecord;
pub use config::AppConfig;
pub use document::{Document, DocumentPrompt, DocumentState, SaveChoice};
pub use error::{CaseError, Result};
pub use gui::run_gui;
pub use table::{Table, TableKind};
