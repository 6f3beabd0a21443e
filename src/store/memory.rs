//! In-memory preference store.

use std::sync::RwLock;

use tracing::debug;

use crate::store::{
    PreferenceRepository, StoreError, StoreResult,
    models::{NewPreference, Preference, preference_id},
};

/// Process-lifetime preference store backed by a `Vec`.
///
/// Inserts take the write lock and assign the id under it, so the order ids
/// are handed out always equals list order. Reads share the read lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    preferences: RwLock<Vec<Preference>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceRepository for MemoryStore {
    fn add(&self, preference: NewPreference) -> StoreResult<Preference> {
        let mut preferences = self
            .preferences
            .write()
            .map_err(|_| StoreError::LockPoisoned { operation: "add" })?;

        let stored = preference.with_id(preference_id(preferences.len()));
        preferences.push(stored.clone());
        debug!(id = %stored.id, "Stored preference");

        Ok(stored)
    }

    fn list(&self) -> StoreResult<Vec<Preference>> {
        let preferences = self
            .preferences
            .read()
            .map_err(|_| StoreError::LockPoisoned { operation: "list" })?;
        Ok(preferences.clone())
    }

    fn search(&self, query: &str, limit: usize) -> StoreResult<Vec<Preference>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        let preferences = self
            .preferences
            .read()
            .map_err(|_| StoreError::LockPoisoned { operation: "search" })?;

        Ok(preferences
            .iter()
            .filter(|p| p.matches(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    fn count(&self) -> StoreResult<usize> {
        let preferences = self
            .preferences
            .read()
            .map_err(|_| StoreError::LockPoisoned { operation: "count" })?;
        Ok(preferences.len())
    }
}
