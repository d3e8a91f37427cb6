use crate::table::{Table, TableKind};

/// Everything a case file persists: identifying fields, notes and the three logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    pub case_name: String,
    pub subject_target: String,
    pub notes: String,
    pub entities: Table,
    pub events: Table,
    pub resources: Table,
}

impl Default for CaseRecord {
    fn default() -> Self {
        Self {
            case_name: String::new(),
            subject_target: String::new(),
            notes: String::new(),
            entities: Table::new(TableKind::Entities),
            events: Table::new(TableKind::Events),
            resources: Table::new(TableKind::Resources),
        }
    }
}

impl CaseRecord {
    pub fn table(&self, kind: TableKind) -> &Table {
        match kind {
            TableKind::Entities => &self.entities,
            TableKind::Events => &self.events,
            TableKind::Resources => &self.resources,
        }
    }

    pub fn table_mut(&mut self, kind: TableKind) -> &mut Table {
        match kind {
            TableKind::Entities => &mut self.entities,
            TableKind::Events => &mut self.events,
            TableKind::Resources => &mut self.resources,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.case_name.is_empty()
            && self.subject_target.is_empty()
            && self.notes.is_empty()
            && TableKind::ALL.iter().all(|k| self.table(*k).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::CaseRecord;
    use crate::table::TableKind;

    #[test]
    fn default_record_is_empty_with_fixed_layouts() {
        let case = CaseRecord::default();
        assert!(case.is_empty());
        for kind in TableKind::ALL {
            assert_eq!(case.table(kind).kind(), kind);
        }
    }

    #[test]
    fn table_mut_targets_the_matching_log() {
        let mut case = CaseRecord::default();
        case.table_mut(TableKind::Events).append_row(["00:00:05"]);
        assert_eq!(case.events.len(), 1);
        assert!(case.entities.is_empty());
        assert!(!case.is_empty());
    }
}
