// Copyright 2025 Cowboy AI, LLC.

//! Storage capability shared by every entity type

use crate::entity::Entity;
use crate::results::{OperationResult, RecordResult};
use async_trait::async_trait;

/// Message for a failed structural check
pub const VALIDATION_FAILED: &str = "Validation failed";
/// Message for a passed structural check
pub const VALIDATION_PASSED: &str = "Validation passed";

/// Create, read, update, delete and existence checks for one entity type
///
/// Implementations never return `Err`: backing-store failures come back as
/// failed results, or `false` for the boolean operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Store a new record keyed by its id
    async fn create(&self, item: &T) -> OperationResult;

    /// Overwrite an existing record
    async fn update(&self, item: &T) -> OperationResult;

    /// Remove a record; `false` for a blank id or on failure
    async fn delete(&self, id: &str) -> bool;

    /// Fetch a record
    async fn get_record_by_id(&self, id: &str) -> RecordResult<T>;

    /// Whether a record is stored under `id`
    async fn record_exists(&self, id: &str) -> bool;

    /// Structural audit-field check applied before every write
    fn validate(&self, item: &T) -> OperationResult;
}

/// Baseline check any entity must pass before it is written
///
/// Only the audit shape is inspected: the id and creator must be non-blank.
/// `createdAt` is always present on a typed entity.
pub fn validate_audit_fields<T: Entity>(item: &T) -> OperationResult {
    let mut errors = Vec::new();
    if item.id().trim().is_empty() {
        errors.push("Entity ID is required".to_string());
    }
    if item.created_by().trim().is_empty() {
        errors.push("CreatedBy is required".to_string());
    }

    if errors.is_empty() {
        OperationResult::ok(VALIDATION_PASSED)
    } else {
        OperationResult::failure(VALIDATION_FAILED, errors)
    }
}
