use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;
use toolshelf_types::{ContextId, ObserverId, ToolId};

// ── ContextId / ObserverId ────────────────────────────────────────

#[test]
fn context_id_new_is_unique() {
    assert_ne!(ContextId::new(), ContextId::new());
}

#[test]
fn context_id_from_uuid_roundtrip() {
    let uuid = uuid::Uuid::now_v7();
    assert_eq!(ContextId::from_uuid(uuid).as_uuid(), uuid);
}

#[test]
fn observer_id_hash_and_eq() {
    let id = ObserverId::new();
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(id);
    assert_eq!(set.len(), 1);
}

// ── ToolId ────────────────────────────────────────────────────────

#[test]
fn tool_id_accepts_slugs() {
    let id = ToolId::parse("json-formatter").unwrap();
    assert_eq!(id.as_str(), "json-formatter");
    assert_eq!(id.to_string(), "json-formatter");
}

#[test]
fn tool_id_rejects_empty_and_uppercase() {
    assert!(ToolId::parse("").is_err());
    assert!(ToolId::parse("JSON").is_err());
    assert!(ToolId::parse("diff checker").is_err());
    assert!(ToolId::from_str("a/b").is_err());
}

#[test]
fn custom_ids_are_prefixed_and_unique() {
    let a = ToolId::new_custom();
    let b = ToolId::new_custom();
    assert!(a.is_custom());
    assert_ne!(a, b);
    assert!(ToolId::parse(a.as_str()).is_ok());
    assert!(!ToolId::parse("json-formatter").unwrap().is_custom());
}

#[test]
fn tool_id_serializes_as_plain_string() {
    let id = ToolId::parse("diff-checker").unwrap();
    assert_eq!(serde_json::to_string(&id).unwrap(), r#""diff-checker""#);
    let back: ToolId = serde_json::from_str(r#""diff-checker""#).unwrap();
    assert_eq!(back, id);
}

#[test]
fn tool_id_deserialization_checks_the_slug() {
    assert!(serde_json::from_str::<ToolId>(r#""JSON Formatter""#).is_err());
    assert!(serde_json::from_str::<ToolId>("\"\"").is_err());
    let ids: Vec<ToolId> = serde_json::from_str(r#"["a-1","b-2"]"#).unwrap();
    assert_eq!(ids.len(), 2);
}

proptest! {
    #[test]
    fn malformed_slugs_never_deserialize(slug in "[a-z]{0,8}[A-Z /_.]{1,3}[a-z]{0,8}") {
        let json = serde_json::to_string(&slug).unwrap();
        prop_assert!(serde_json::from_str::<ToolId>(&json).is_err());
    }

    #[test]
    fn valid_slugs_always_parse(slug in "[a-z0-9-]{1,40}") {
        let id = ToolId::parse(&slug).unwrap();
        prop_assert_eq!(id.as_str(), slug.as_str());
    }
}
