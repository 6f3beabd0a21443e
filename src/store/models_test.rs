//! Tests for domain models.

use crate::store::models::*;

#[test]
fn preference_id_is_one_based() {
    assert_eq!(preference_id(0), "pref_1");
    assert_eq!(preference_id(41), "pref_42");
}

#[test]
fn new_preference_defaults_missing_lists() {
    let parsed: NewPreference = serde_json::from_str(
        r#"{"title":"t","description":"d","code":"c","language":"rust"}"#,
    )
    .unwrap();

    assert!(parsed.tags.is_empty());
    assert!(parsed.dependencies.is_empty());
    assert!(parsed.framework.is_none());
}

#[test]
fn preference_serializes_absent_optionals_as_null() {
    let preference = NewPreference {
        title: "t".to_string(),
        ..Default::default()
    }
    .with_id("pref_1".to_string());

    let json = serde_json::to_value(&preference).unwrap();
    assert_eq!(json["id"], "pref_1");
    assert!(json["framework"].is_null());
    assert_eq!(json["tags"], serde_json::json!([]));
}

#[test]
fn matches_expects_lowercased_needle() {
    let preference = NewPreference {
        title: "Async Rust".to_string(),
        tags: vec!["Tokio".to_string()],
        ..Default::default()
    }
    .with_id("pref_1".to_string());

    assert!(preference.matches("async"));
    assert!(preference.matches("tok"));
    assert!(preference.matches(""));
    assert!(!preference.matches("python"));
}
