//! Case file persistence (JSON) and table export (CSV).
//!
//! Case files carry no column headers: the reader relies on the fixed layout
//! in [`TableKind`]. Loading is deliberately lenient: missing keys default to
//! empty values, rows are padded or truncated to the column count, and
//! non-string scalars load as empty text. Structural problems (a non-object
//! document, a table that is not an array of arrays) are rejected.

use crate::error::{CaseError, Result};
use crate::statics;
use crate::{CaseRecord, Table, TableKind};
use serde_json::{Map, Value};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub fn to_json(case: &CaseRecord) -> Value {
    let mut obj = Map::new();
    obj.insert(
        statics::KEY_CASE_NAME.to_string(),
        Value::String(case.case_name.clone()),
    );
    obj.insert(
        statics::KEY_SUBJECT_TARGET.to_string(),
        Value::String(case.subject_target.clone()),
    );
    obj.insert(
        statics::KEY_NOTES.to_string(),
        Value::String(case.notes.clone()),
    );
    for kind in TableKind::ALL {
        obj.insert(kind.json_key().to_string(), table_to_json(case.table(kind)));
    }
    Value::Object(obj)
}

fn table_to_json(table: &Table) -> Value {
    Value::Array(
        table
            .rows()
            .iter()
            .map(|row| Value::Array(row.iter().cloned().map(Value::String).collect()))
            .collect(),
    )
}

pub fn from_json(doc: &Value) -> Result<CaseRecord> {
    let Some(obj) = doc.as_object() else {
        return Err(CaseError::Parse("top-level value is not an object".into()));
    };

    let mut case = CaseRecord {
        case_name: text_field(obj, statics::KEY_CASE_NAME),
        subject_target: text_field(obj, statics::KEY_SUBJECT_TARGET),
        notes: text_field(obj, statics::KEY_NOTES),
        ..Default::default()
    };

    for kind in TableKind::ALL {
        if let Some(value) = obj.get(kind.json_key()) {
            let rows = rows_from_json(kind, value)?;
            case.table_mut(kind).load_rows(rows);
        }
    }

    Ok(case)
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        None | Some(Value::String(_)) => {}
        Some(other) => warn!(key, value = %other, "non-string field loaded as empty"),
    }
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn rows_from_json(kind: TableKind, value: &Value) -> Result<Vec<Vec<String>>> {
    let key = kind.json_key();
    let rows = value
        .as_array()
        .ok_or_else(|| CaseError::Parse(format!("`{key}` is not an array")))?;

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let cells = row
                .as_array()
                .ok_or_else(|| CaseError::Parse(format!("`{key}[{idx}]` is not an array")))?;
            if cells.len() != kind.column_count() {
                warn!(
                    table = key,
                    row = idx,
                    width = cells.len(),
                    expected = kind.column_count(),
                    "row width mismatch; padding/truncating"
                );
            }
            Ok(cells
                .iter()
                .map(|c| c.as_str().unwrap_or_default().to_string())
                .collect())
        })
        .collect()
}

pub fn from_str(text: &str) -> Result<CaseRecord> {
    let doc: Value = serde_json::from_str(text)?;
    from_json(&doc)
}

/// Pretty-printed JSON text with a trailing newline.
pub fn to_string_pretty(case: &CaseRecord) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&to_json(case))?;
    text.push('\n');
    Ok(text)
}

pub fn read_file(path: &Path) -> Result<CaseRecord> {
    let bytes = fs::read(path).map_err(|e| CaseError::io(path, e))?;
    let text = std::str::from_utf8(&bytes)
        .map_err(|_| CaseError::Parse("case file is not valid UTF-8".into()))?;
    let case = from_str(text)?;
    info!(path = %path.display(), "read case file");
    Ok(case)
}

pub fn write_file(case: &CaseRecord, path: &Path) -> Result<()> {
    let text = to_string_pretty(case)?;
    write_atomic(path, text.as_bytes())?;
    info!(path = %path.display(), bytes = text.len(), "wrote case file");
    Ok(())
}

/// Writes to a sibling temp file, then renames it over `path`. An existing
/// file is never left half-written and keeps its permissions; a new file gets
/// the same umask-governed mode a plain create would.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let existing = fs::metadata(path).ok().map(|m| m.permissions());

    let mut builder = tempfile::Builder::new();
    if existing.is_none() {
        create_mode(&mut builder);
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| CaseError::io(dir, e))?;
    if let Some(perms) = existing {
        tmp.as_file()
            .set_permissions(perms)
            .map_err(|e| CaseError::io(tmp.path(), e))?;
    }
    tmp.write_all(bytes).map_err(|e| CaseError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| CaseError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| CaseError::io(path, e.error))?;
    Ok(())
}

#[cfg(unix)]
fn create_mode(builder: &mut tempfile::Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt;
    // Same request as `File::create`; the process umask still applies.
    builder.permissions(fs::Permissions::from_mode(0o666));
}

#[cfg(not(unix))]
fn create_mode(_builder: &mut tempfile::Builder<'_, '_>) {}

/// CSV text for `table` under `headers`: every field quoted, quotes doubled,
/// `\n` line endings. Cells past a row's end export as empty fields.
pub fn table_to_csv(table: &Table, headers: &[&str]) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut buf);

        writer.write_record(headers)?;
        for row in table.rows() {
            writer.write_record(
                (0..headers.len()).map(|col| row.get(col).map_or("", String::as_str)),
            )?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }

    String::from_utf8(buf).map_err(|e| CaseError::Parse(e.to_string()))
}

pub fn write_csv_file(table: &Table, path: &Path) -> Result<()> {
    let text = table_to_csv(table, table.headers())?;
    write_atomic(path, text.as_bytes())?;
    info!(path = %path.display(), table = ?table.kind(), rows = table.len(), "exported CSV");
    Ok(())
}

/// Suggested CSV name: the case name with spaces as underscores, then the table suffix.
pub fn default_export_file_name(case_name: &str, kind: TableKind) -> String {
    let stem = case_name.trim().replace(' ', "_");
    let stem = if stem.is_empty() {
        statics::EXPORT_FALLBACK_STEM
    } else {
        stem.as_str()
    };
    format!("{stem}_{}.{}", kind.json_key(), statics::CSV_EXTENSION)
}

/// Appends `ext` when `path` has no extension at all.
pub fn ensure_extension(path: &Path, ext: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(ext)
    }
}

#[cfg(test)]
mod tests {
    use super::{default_export_file_name, ensure_extension, from_json, to_json};
    use crate::{CaseRecord, TableKind};
    use serde_json::json;
    use std::path::Path;

    #[test]
    fn empty_record_serializes_to_empty_fields() {
        let doc = to_json(&CaseRecord::default());
        assert_eq!(
            doc,
            json!({
                "caseName": "",
                "subjectTarget": "",
                "notes": "",
                "entities": [],
                "events": [],
                "resources": [],
            })
        );
    }

    #[test]
    fn null_table_is_rejected() {
        let err = from_json(&json!({ "events": null })).expect_err("null is not an array");
        assert!(err.to_string().contains("`events` is not an array"));
    }

    #[test]
    fn export_name_uses_case_name() {
        assert_eq!(
            default_export_file_name("Op North Wind", TableKind::Entities),
            "Op_North_Wind_entities.csv"
        );
        assert_eq!(
            default_export_file_name("", TableKind::Resources),
            "export_resources.csv"
        );
    }

    #[test]
    fn ensure_extension_only_fills_missing() {
        assert_eq!(
            ensure_extension(Path::new("/tmp/case"), "osintcase"),
            Path::new("/tmp/case.osintcase")
        );
        assert_eq!(
            ensure_extension(Path::new("/tmp/case.json"), "osintcase"),
            Path::new("/tmp/case.json")
        );
    }
}
