use std::time::Duration;
use toolshelf_directory::{Catalog, DirectoryConfig, DirectoryError};

#[test]
fn defaults() {
    let config = DirectoryConfig::default();
    assert_eq!(config.search_debounce(), Duration::from_millis(300));
    assert_eq!(config.search_cache_capacity, 50);
    assert_eq!(config.bundle_limit, 4);
}

#[test]
fn partial_json_keeps_defaults() {
    let config = DirectoryConfig::from_json(r#"{"search_debounce_ms": 150}"#).unwrap();
    assert_eq!(config.search_debounce_ms, 150);
    assert_eq!(config.notification_capacity, 64);
}

#[test]
fn zero_bundle_limit_is_rejected() {
    let err = DirectoryConfig::from_json(r#"{"bundle_limit": 0}"#).unwrap_err();
    assert!(matches!(err, DirectoryError::Config(_)));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = DirectoryConfig::from_json("{").unwrap_err();
    assert!(matches!(err, DirectoryError::Serialization(_)));
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toolshelf.json");
    std::fs::write(&path, r#"{"search_cache_capacity": 5}"#).unwrap();
    assert_eq!(DirectoryConfig::load(&path).unwrap().search_cache_capacity, 5);

    let missing = DirectoryConfig::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(missing, DirectoryError::Io(_)));
}

#[test]
fn catalog_with_malformed_id_is_rejected() {
    let result = Catalog::from_json(
        r#"[{"id":"Diff Checker","name":"Diff","description":"","url":"https://d","category":"X"}]"#,
    );
    assert!(matches!(result, Err(DirectoryError::Serialization(_))));
}

#[test]
fn catalog_drops_duplicate_ids() {
    let catalog = Catalog::from_json(
        r#"[
            {"id":"a","name":"First","description":"","url":"https://a","category":"X"},
            {"id":"a","name":"Second","description":"","url":"https://a2","category":"X"}
        ]"#,
    )
    .unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.tools()[0].name, "First");
}
