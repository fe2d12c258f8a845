use std::io::Write;

use glee_ingest::{
    IngestError, MAX_CSV_FILE_SIZE, check_file_size_with_limit, read_csv_file, template_csv,
};
use glee_model::{builtin_profiles, find_profile};
use tempfile::NamedTempFile;

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn reads_fan_upload_file() {
    let file = create_temp_csv(
        "FirstName,LastName,Email\nJohn,Doe,john@example.com\nJane,Smith,not-an-email\n",
    );
    let parsed = read_csv_file(file.path()).unwrap();

    assert_eq!(parsed.headers.columns, vec!["FirstName", "LastName", "Email"]);
    assert_eq!(parsed.rows.len(), 2);
    assert_eq!(parsed.rows[0].value("Email"), Some("john@example.com"));
    assert_eq!(parsed.rows[1].line, 3);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_csv_file(&dir.path().join("absent.csv"));
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn oversized_file_is_rejected() {
    let file = create_temp_csv("A,B\n1,2\n");
    let result = check_file_size_with_limit(file.path(), 4);
    assert!(matches!(
        result,
        Err(IngestError::FileTooLarge { max_size: 4, .. })
    ));
    assert!(check_file_size_with_limit(file.path(), MAX_CSV_FILE_SIZE).is_ok());
}

#[test]
fn malformed_header_stops_the_parse() {
    let file = create_temp_csv("Title,,Voicing\nAve Maria,Biebl,SSAA\n");
    let result = read_csv_file(file.path());
    assert!(matches!(result, Err(IngestError::EmptyHeader { column: 2 })));
}

#[test]
fn sheet_music_template() {
    let profiles = builtin_profiles();
    let profile = find_profile(&profiles, "sheet-music").unwrap();
    let csv = template_csv(profile).unwrap();
    insta::assert_snapshot!(csv, @r"
    Title,Composer,Voicing,Arranger,Copies
    Ave Maria,Franz Biebl,SSAA,,40
    Lift Every Voice,J. Rosamond Johnson,SATB,Roland Carter,65
    ");
}

#[test]
fn template_round_trips_through_the_parser() {
    let profiles = builtin_profiles();
    for profile in &profiles {
        let csv = template_csv(profile).unwrap();
        let file = create_temp_csv(&csv);
        let parsed = read_csv_file(file.path()).unwrap();
        assert_eq!(parsed.headers.columns, profile.labels());
    }
}
