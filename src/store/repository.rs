//! Repository trait for preference storage.
//!
//! The HTTP layer is generic over this trait so the backend can be swapped
//! (or mocked) without touching handlers.

#[cfg(test)]
use mockall::automock;

use crate::store::{
    StoreResult,
    models::{NewPreference, Preference},
};

/// Default number of results returned by a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Storage for coding preferences.
#[cfg_attr(test, automock)]
pub trait PreferenceRepository: Send + Sync {
    /// Store a new preference, assigning its id.
    fn add(&self, preference: NewPreference) -> StoreResult<Preference>;

    /// All preferences in insertion order.
    fn list(&self) -> StoreResult<Vec<Preference>>;

    /// First `limit` preferences matching `query`, in insertion order.
    ///
    /// Matching is a case-insensitive substring test against title,
    /// description, code and tags. No ranking is applied.
    fn search(&self, query: &str, limit: usize) -> StoreResult<Vec<Preference>>;

    /// Number of stored preferences.
    fn count(&self) -> StoreResult<usize>;
}
