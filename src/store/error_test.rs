//! Tests for store error types.

use crate::store::{StoreError, StoreResult};

#[test]
fn lock_poisoned_error_displays_operation() {
    let err = StoreError::LockPoisoned { operation: "add" };
    assert_eq!(err.to_string(), "Preference store lock poisoned during add");
}

#[test]
fn store_result_err_is_err() {
    let result: StoreResult<usize> = Err(StoreError::LockPoisoned { operation: "list" });
    assert!(result.is_err());
}
