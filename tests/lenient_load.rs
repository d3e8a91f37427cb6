use pretty_assertions::assert_eq;

use data_organizer::{CaseError, CaseRecord, case_file};
use serde_json::json;

#[test]
fn missing_keys_default_to_empty() {
    let case = case_file::from_json(&json!({ "caseName": "Only a name" })).expect("lenient load");
    assert_eq!(
        case,
        CaseRecord {
            case_name: "Only a name".to_string(),
            ..Default::default()
        }
    );
}

#[test]
fn rows_are_padded_and_truncated_to_column_count() {
    let case = case_file::from_json(&json!({
        "entities": [["00:00:01"], ["a", "b", "c", "d", "extra"]],
        "events": [[]],
    }))
    .expect("lenient load");

    assert_eq!(case.entities.rows()[0], vec!["00:00:01", "", "", ""]);
    assert_eq!(case.entities.rows()[1], vec!["a", "b", "c", "d"]);
    assert_eq!(case.events.rows()[0], vec!["", "", ""]);
}

#[test]
fn non_string_values_load_as_empty_text() {
    let case = case_file::from_json(&json!({
        "caseName": 42,
        "notes": null,
        "resources": [[true, "desc", 3.5]],
    }))
    .expect("lenient load");

    assert_eq!(case.case_name, "");
    assert_eq!(case.notes, "");
    assert_eq!(case.resources.rows()[0], vec!["", "desc", ""]);
}

#[test]
fn non_object_document_is_rejected() {
    for doc in [json!([]), json!("case"), json!(null)] {
        let err = case_file::from_json(&doc).expect_err("not an object");
        assert!(matches!(err, CaseError::Parse(_)));
    }
}

#[test]
fn table_that_is_not_array_of_arrays_is_rejected() {
    let err = case_file::from_json(&json!({ "entities": "nope" })).expect_err("not an array");
    assert!(matches!(err, CaseError::Parse(_)));

    let err = case_file::from_json(&json!({ "events": [["ok", "", ""], "row"] }))
        .expect_err("row is not an array");
    assert!(err.to_string().contains("`events[1]`"));
}

#[test]
fn malformed_text_is_parse_error() {
    let err = case_file::from_str("{ \"caseName\": ").expect_err("truncated JSON");
    assert!(matches!(err, CaseError::Parse(_)));
}

#[test]
fn unreadable_bytes_are_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("binary.osintcase");
    std::fs::write(&path, [0xFF_u8, 0xFE, 0x00]).expect("write");
    let err = case_file::read_file(&path).expect_err("not UTF-8");
    assert!(matches!(err, CaseError::Parse(_)));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = case_file::read_file(&dir.path().join("absent.osintcase")).expect_err("missing");
    assert!(matches!(err, CaseError::Io { .. }));
}
