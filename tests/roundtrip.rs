use pretty_assertions::assert_eq;

use data_organizer::{CaseRecord, TableKind, case_file};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn sample_case() -> CaseRecord {
    let mut case = CaseRecord {
        case_name: "Harbor Lights".to_string(),
        subject_target: "M/V Albatross".to_string(),
        notes: "[00:02:10] vessel leaves berth\nline two with \"quotes\" and ünïcode".to_string(),
        ..Default::default()
    };
    case.entities
        .append_row(["00:02:10", "Albatross", "Vessel", "flag changed twice"]);
    case.entities.append_row(["00:05:44", "J. Doe", "Person", ""]);
    case.events
        .append_row(["00:02:10", "00:03:00", "Departure, no pilot"]);
    case.resources.append_row([
        "https://example.org/ais?id=1",
        "AIS history",
        "2024-05-01 10:00:00",
    ]);
    case
}

#[test]
fn json_roundtrip_is_identity() -> Result<()> {
    let case = sample_case();
    let back = case_file::from_json(&case_file::to_json(&case))?;
    assert_eq!(back, case);
    Ok(())
}

#[test]
fn file_roundtrip_is_identity() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("harbor.osintcase");

    let case = sample_case();
    case_file::write_file(&case, &path)?;
    let back = case_file::read_file(&path)?;
    assert_eq!(back, case);
    Ok(())
}

#[test]
fn written_file_is_pretty_json_with_expected_shape() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("harbor.osintcase");
    case_file::write_file(&sample_case(), &path)?;

    let text = std::fs::read_to_string(&path)?;
    assert!(text.contains("\n  \"caseName\": \"Harbor Lights\""));
    assert!(text.ends_with("}\n"));

    let doc: serde_json::Value = serde_json::from_str(&text)?;
    assert_eq!(doc["entities"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        doc["entities"][0].as_array().map(Vec::len),
        Some(TableKind::Entities.column_count())
    );
    assert_eq!(doc["events"][0][2], "Departure, no pilot");
    assert_eq!(doc["resources"][0][1], "AIS history");
    Ok(())
}

#[test]
fn write_replaces_existing_file_without_leftovers() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("case.osintcase");
    std::fs::write(&path, b"old contents")?;

    case_file::write_file(&sample_case(), &path)?;

    let names: Vec<_> = std::fs::read_dir(dir.path())?
        .map(|e| e.map(|e| e.file_name()))
        .collect::<std::io::Result<_>>()?;
    assert_eq!(names, vec![std::ffi::OsString::from("case.osintcase")]);
    assert_eq!(case_file::read_file(&path)?, sample_case());
    Ok(())
}

#[test]
fn write_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("case.osintcase");
    let err = case_file::write_file(&sample_case(), &path).expect_err("no such directory");
    assert!(matches!(err, data_organizer::CaseError::Io { .. }));
    assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn save_over_existing_file_keeps_its_mode() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    for mode in [0o644, 0o640] {
        let path = dir.path().join(format!("case_{mode:o}.osintcase"));
        std::fs::write(&path, b"{}")?;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))?;

        case_file::write_file(&sample_case(), &path)?;

        let after = std::fs::metadata(&path)?.permissions().mode() & 0o777;
        assert_eq!(after, mode);
    }
    Ok(())
}

#[cfg(unix)]
#[test]
fn new_export_gets_plain_create_mode() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let reference = dir.path().join("reference.csv");
    std::fs::write(&reference, b"")?;
    let export = dir.path().join("harbor_entities.csv");

    case_file::write_csv_file(&sample_case().entities, &export)?;

    let mode = |p: &std::path::Path| -> std::io::Result<u32> {
        Ok(std::fs::metadata(p)?.permissions().mode() & 0o777)
    };
    assert_eq!(mode(&export)?, mode(&reference)?);
    Ok(())
}
