//! Store error types.
//!
//! Uses miette for diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Preference store errors.
#[derive(Error, Diagnostic, Debug)]
pub enum StoreError {
    #[error("Preference store lock poisoned during {operation}")]
    #[diagnostic(
        code(prefs::store::lock_poisoned),
        help("A writer panicked while holding the store lock; restart the server")
    )]
    LockPoisoned { operation: &'static str },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
