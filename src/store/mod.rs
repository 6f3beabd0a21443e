//! Preference storage.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Preference, NewPreference)
//! - `repository`: Trait definition for data access
//! - `memory`: The in-memory backend

mod error;
mod memory;
mod models;
mod repository;

#[cfg(test)]
mod error_test;
#[cfg(test)]
mod memory_test;
#[cfg(test)]
mod models_test;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use models::*;
#[cfg(test)]
pub use repository::MockPreferenceRepository;
pub use repository::{DEFAULT_SEARCH_LIMIT, PreferenceRepository};
