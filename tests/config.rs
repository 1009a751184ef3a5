//! Configuration loading tests

mod common;

use common::RecordingSource;
use tokenfield::{FieldConfig, FilterOutcome, TokenField};

#[test]
fn test_load_config_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("field.yaml");
    std::fs::write(&path, "separator: \",\"\nthreshold: 2\n").unwrap();

    let config = FieldConfig::load(&path).unwrap();
    assert_eq!(config.separator, ',');
    assert_eq!(config.threshold, 2);
}

#[test]
fn test_load_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(FieldConfig::load(&dir.path().join("absent.yaml")).is_err());
}

#[test]
fn test_load_or_default_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let missing = FieldConfig::load_or_default(&dir.path().join("absent.yaml"));
    assert_eq!(missing, FieldConfig::default());

    let garbled = dir.path().join("broken.yaml");
    std::fs::write(&garbled, ": not yaml [").unwrap();
    assert_eq!(FieldConfig::load_or_default(&garbled), FieldConfig::default());
}

#[test]
fn test_configured_field_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("field.yaml");
    std::fs::write(&path, "separator: \",\"\nthreshold: 2\n").unwrap();

    let mut field = TokenField::from_text("highway,re");
    FieldConfig::load(&path).unwrap().configure(&mut field);
    field.set_selection(Some(10));

    let source = RecordingSource::new();
    field.set_suggestion_source(Some(Box::new(source.handle())));
    match field.perform_filtering() {
        FilterOutcome::Query(q) => assert_eq!(q.pattern, "re"),
        other => panic!("expected query, got {:?}", other),
    }
}
