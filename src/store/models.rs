//! Domain models for the preference store.
//!
//! These models are storage-agnostic. The HTTP layer converts its request and
//! response DTOs to and from these types.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store, of the form `pref_<n>`.
pub type Id = String;

/// Prefix for every preference id.
pub const ID_PREFIX: &str = "pref_";

/// A stored coding preference.
///
/// Only the store constructs values of this type; callers hand in a
/// [`NewPreference`] and receive a `Preference` with its id populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub framework: Option<String>,
    pub version: Option<String>,
    pub tags: Vec<String>,
    pub dependencies: Vec<String>,
    pub setup_instructions: Option<String>,
    pub example_usage: Option<String>,
    pub best_practices: Option<String>,
}

/// A preference that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPreference {
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub framework: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub setup_instructions: Option<String>,
    pub example_usage: Option<String>,
    pub best_practices: Option<String>,
}

impl NewPreference {
    /// Attach the store-assigned id.
    pub fn with_id(self, id: Id) -> Preference {
        Preference {
            id,
            title: self.title,
            description: self.description,
            code: self.code,
            language: self.language,
            framework: self.framework,
            version: self.version,
            tags: self.tags,
            dependencies: self.dependencies,
            setup_instructions: self.setup_instructions,
            example_usage: self.example_usage,
            best_practices: self.best_practices,
        }
    }
}

impl Preference {
    /// Keyword match used by search.
    ///
    /// `needle` must already be lower-cased. Matches when it is a substring of
    /// the title, description or code, or of any single tag. Language,
    /// framework and dependencies are not searched.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.code.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Build the id for the record inserted when the store holds `count` records.
pub fn preference_id(count: usize) -> Id {
    format!("{}{}", ID_PREFIX, count + 1)
}
