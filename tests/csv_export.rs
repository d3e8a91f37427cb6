use pretty_assertions::assert_eq;

use data_organizer::{Table, TableKind, case_file};

#[test]
fn header_and_rows_are_always_quoted() {
    let mut table = Table::new(TableKind::Events);
    table.append_row(["00:00:01", "00:00:09", "door opens"]);

    let csv = case_file::table_to_csv(&table, TableKind::Events.headers()).expect("csv");
    assert_eq!(
        csv,
        "\"Start Time\",\"End Time\",\"Event Description\"\n\
         \"00:00:01\",\"00:00:09\",\"door opens\"\n"
    );
}

#[test]
fn embedded_quotes_are_doubled() {
    let mut table = Table::new(TableKind::Entities);
    table.append_row(["", "He said \"hi\"", "", ""]);

    let csv = case_file::table_to_csv(&table, table.headers()).expect("csv");
    let line = csv.lines().nth(1).expect("data row");
    assert_eq!(line, r#""","He said ""hi""","","""#);
}

#[test]
fn commas_and_newlines_stay_inside_quotes() {
    let mut table = Table::new(TableKind::Resources);
    table.append_row(["a,b", "line1\nline2", "x"]);

    let csv = case_file::table_to_csv(&table, table.headers()).expect("csv");
    assert!(csv.ends_with("\"a,b\",\"line1\nline2\",\"x\"\n"));
    assert!(!csv.contains('\r'));
}

#[test]
fn extra_headers_export_empty_cells() {
    let mut table = Table::new(TableKind::Events);
    table.append_row(["s", "e", "d"]);

    let csv = case_file::table_to_csv(&table, &["A", "B", "C", "D"]).expect("csv");
    assert_eq!(csv.lines().nth(1), Some(r#""s","e","d","""#));
}

#[test]
fn empty_table_exports_header_only() {
    let table = Table::new(TableKind::Resources);
    let csv = case_file::table_to_csv(&table, table.headers()).expect("csv");
    assert_eq!(csv, "\"URL / File Path\",\"Description\",\"Date Accessed\"\n");
}

#[test]
fn write_csv_file_uses_table_headers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.csv");

    let mut table = Table::new(TableKind::Entities);
    table.append_row(["00:00:03", "Albatross", "Vessel", ""]);
    case_file::write_csv_file(&table, &path).expect("export");

    let text = std::fs::read_to_string(&path).expect("read");
    assert!(text.starts_with("\"Timestamp\",\"Entity Name\",\"Type\",\"Notes\"\n"));
    assert_eq!(text.lines().count(), 2);
}
