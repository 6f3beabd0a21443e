//! Tests for the in-memory preference store.

use std::sync::Arc;

use crate::store::{MemoryStore, NewPreference, PreferenceRepository};

fn pref(title: &str) -> NewPreference {
    NewPreference {
        title: title.to_string(),
        description: format!("{} description", title),
        code: "fn main() {}".to_string(),
        language: "rust".to_string(),
        ..Default::default()
    }
}

#[test]
fn add_assigns_sequential_ids() {
    let store = MemoryStore::new();

    for n in 1..=4 {
        let stored = store.add(pref(&format!("item {}", n))).unwrap();
        assert_eq!(stored.id, format!("pref_{}", n));
    }
}

#[test]
fn add_returns_record_with_all_fields() {
    let store = MemoryStore::new();
    let input = NewPreference {
        title: "Retry wrapper".to_string(),
        description: "wraps calls".to_string(),
        code: "def f(): pass".to_string(),
        language: "python".to_string(),
        framework: Some("tenacity".to_string()),
        version: None,
        tags: vec!["reliability".to_string(), "reliability".to_string()],
        dependencies: vec!["tenacity".to_string()],
        setup_instructions: None,
        example_usage: Some("f()".to_string()),
        best_practices: None,
    };

    let stored = store.add(input.clone()).unwrap();

    assert_eq!(stored, input.with_id("pref_1".to_string()));
    assert_eq!(stored.tags.len(), 2, "duplicate tags are kept");
    assert!(stored.version.is_none());
}

#[test]
fn add_accepts_empty_strings() {
    let store = MemoryStore::new();
    let stored = store.add(NewPreference::default()).unwrap();

    assert_eq!(stored.id, "pref_1");
    assert_eq!(stored.title, "");
}

#[test]
fn list_returns_records_in_insertion_order() {
    let store = MemoryStore::new();
    assert!(store.list().unwrap().is_empty());

    for title in ["first", "second", "third"] {
        store.add(pref(title)).unwrap();
    }

    let titles: Vec<String> = store.list().unwrap().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn empty_query_matches_first_records_up_to_limit() {
    let store = MemoryStore::new();
    for n in 1..=7 {
        store.add(pref(&format!("item {}", n))).unwrap();
    }

    let results = store.search("", 5).unwrap();
    let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["pref_1", "pref_2", "pref_3", "pref_4", "pref_5"]);
}

#[test]
fn search_is_case_insensitive() {
    let store = MemoryStore::new();
    store.add(pref("Python decorators")).unwrap();
    store.add(pref("Rust traits")).unwrap();

    let upper = store.search("PYTHON", 5).unwrap();
    let lower = store.search("python", 5).unwrap();

    assert_eq!(upper.len(), 1);
    assert_eq!(upper, lower);
    assert_eq!(upper[0].title, "Python decorators");
}

#[test]
fn search_respects_limit_in_store_order() {
    let store = MemoryStore::new();
    for n in 1..=10 {
        store.add(pref(&format!("logging helper {}", n))).unwrap();
    }

    let results = store.search("logging", 3).unwrap();
    let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["pref_1", "pref_2", "pref_3"]);
}

#[test]
fn search_with_zero_limit_returns_nothing() {
    let store = MemoryStore::new();
    store.add(pref("anything")).unwrap();

    assert!(store.search("", 0).unwrap().is_empty());
    assert!(store.search("anything", 0).unwrap().is_empty());
}

#[test]
fn search_matches_tag_substring() {
    let store = MemoryStore::new();
    store.add(pref("unrelated")).unwrap();
    store
        .add(NewPreference {
            title: "State management".to_string(),
            description: "component state".to_string(),
            code: "useState()".to_string(),
            language: "typescript".to_string(),
            tags: vec!["react".to_string(), "hooks".to_string()],
            ..Default::default()
        })
        .unwrap();

    let results = store.search("hook", 5).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "pref_2");
}

#[test]
fn search_matches_description_and_code() {
    let store = MemoryStore::new();
    store
        .add(NewPreference {
            description: "Uses Exponential backoff".to_string(),
            ..pref("a")
        })
        .unwrap();
    store
        .add(NewPreference {
            code: "tokio::spawn(async move {})".to_string(),
            ..pref("b")
        })
        .unwrap();

    assert_eq!(store.search("exponential", 5).unwrap()[0].id, "pref_1");
    assert_eq!(store.search("TOKIO::SPAWN", 5).unwrap()[0].id, "pref_2");
}

#[test]
fn search_ignores_language_and_dependencies() {
    let store = MemoryStore::new();
    store
        .add(NewPreference {
            title: "Formatter".to_string(),
            language: "haskell".to_string(),
            dependencies: vec!["ormolu".to_string()],
            ..Default::default()
        })
        .unwrap();

    assert!(store.search("haskell", 5).unwrap().is_empty());
    assert!(store.search("ormolu", 5).unwrap().is_empty());
}

#[test]
fn search_does_not_mutate_store() {
    let store = MemoryStore::new();
    store.add(pref("one")).unwrap();
    store.add(pref("two")).unwrap();

    let before = store.list().unwrap();
    let _ = store.search("one", 5).unwrap();
    let _ = store.search("", 1).unwrap();

    assert_eq!(store.list().unwrap(), before);
}

#[test]
fn retry_wrapper_scenario() {
    let store = MemoryStore::new();
    let stored = store
        .add(NewPreference {
            title: "Retry wrapper".to_string(),
            description: "wraps calls".to_string(),
            code: "def f(): pass".to_string(),
            language: "python".to_string(),
            tags: vec!["reliability".to_string()],
            ..Default::default()
        })
        .unwrap();
    assert_eq!(stored.id, "pref_1");

    let results = store.search("retry", 5).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0], stored);
}

#[test]
fn concurrent_adds_produce_unique_ordered_ids() {
    let store = Arc::new(MemoryStore::new());

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for n in 0..25 {
                    store.add(pref(&format!("w{} n{}", worker, n))).unwrap();
                }
            });
        }
    });

    let all = store.list().unwrap();
    assert_eq!(all.len(), 200);
    for (index, preference) in all.iter().enumerate() {
        assert_eq!(preference.id, format!("pref_{}", index + 1));
    }
}
