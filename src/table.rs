use crate::error::{CaseError, Result};
use crate::statics;
use std::collections::BTreeSet;
use tracing::debug;

/// The three fixed-layout logs a case carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Entities,
    Events,
    Resources,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::Entities, TableKind::Events, TableKind::Resources];

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            TableKind::Entities => &[
                statics::EN_COL_TIMESTAMP,
                statics::EN_COL_ENTITY_NAME,
                statics::EN_COL_TYPE,
                statics::EN_COL_NOTES,
            ],
            TableKind::Events => &[
                statics::EN_COL_START_TIME,
                statics::EN_COL_END_TIME,
                statics::EN_COL_EVENT_DESCRIPTION,
            ],
            TableKind::Resources => &[
                statics::EN_COL_URL_PATH,
                statics::EN_COL_DESCRIPTION,
                statics::EN_COL_DATE_ACCESSED,
            ],
        }
    }

    pub fn column_count(self) -> usize {
        self.headers().len()
    }

    /// Key of this table in the case file.
    pub fn json_key(self) -> &'static str {
        match self {
            TableKind::Entities => statics::KEY_ENTITIES,
            TableKind::Events => statics::KEY_EVENTS,
            TableKind::Resources => statics::KEY_RESOURCES,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TableKind::Entities => statics::EN_TAB_ENTITIES,
            TableKind::Events => statics::EN_TAB_EVENTS,
            TableKind::Resources => statics::EN_TAB_RESOURCES,
        }
    }

    /// Column the UI focuses after a stamped row is added.
    pub fn edit_column(self) -> usize {
        match self {
            TableKind::Entities => 1,
            TableKind::Events => 2,
            TableKind::Resources => 0,
        }
    }
}

/// Ordered rows of text cells. Every row is exactly `kind.column_count()` wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    kind: TableKind,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn headers(&self) -> &'static [&'static str] {
        self.kind.headers()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Appends a row built from `initial`, padded with empty cells or truncated
    /// to the column count. Returns the new row's index.
    pub fn append_row<I, S>(&mut self, initial: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row = self.normalize(initial.into_iter().map(Into::into).collect());
        self.rows.push(row);
        let idx = self.rows.len() - 1;
        debug!(table = ?self.kind, row = idx, "appended row");
        idx
    }

    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) -> Result<()> {
        let rows = self.rows.len();
        let cols = self.kind.column_count();
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(CaseError::Index {
                row,
                col,
                rows,
                cols,
            })?;
        *cell = text.into();
        Ok(())
    }

    /// Removes the given rows. Indices are processed highest first so earlier
    /// removals don't shift later ones; out-of-range indices are skipped.
    /// Returns how many rows were removed.
    pub fn remove_rows(&mut self, indices: &BTreeSet<usize>) -> usize {
        let mut removed = 0;
        for &idx in indices.iter().rev() {
            if idx < self.rows.len() {
                self.rows.remove(idx);
                removed += 1;
            } else {
                debug!(table = ?self.kind, row = idx, "skipping out-of-range row removal");
            }
        }
        removed
    }

    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.rows.clone()
    }

    /// Replaces all rows. Rows of the wrong width are padded or truncated.
    pub fn load_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows.clear();
        for row in rows {
            let row = self.normalize(row);
            self.rows.push(row);
        }
    }

    fn normalize(&self, mut row: Vec<String>) -> Vec<String> {
        row.resize(self.kind.column_count(), String::new());
        row
    }
}
