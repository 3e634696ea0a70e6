// Copyright 2025 Cowboy AI, LLC.

//! Generic store-or-update orchestration
//!
//! [`EntityService`] decides between create and update by asking the
//! repository whether the id is already stored. Entity-specific behavior is
//! injected as a validation function rather than by specializing the
//! service.
//!
//! ```mermaid
//! graph LR
//!     C[StoreEntityCommand] --> V{validate}
//!     V -->|fail| R[failed result]
//!     V -->|ok| E{record_exists}
//!     E -->|no| CR[stamp_created + create]
//!     E -->|yes| UP[stamp_updated + update]
//! ```

use crate::commands::StoreEntityCommand;
use crate::entity::Entity;
use crate::errors::DomainError;
use crate::identifiers::parse_record_id;
use crate::persistence::Repository;
use crate::results::{OperationResult, RecordResult};
use crate::schema::{Schema, VALIDATION_SUCCESSFUL};
use chrono::Utc;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Validation strategy run before every store
pub type Validator<T> = Arc<dyn Fn(&T) -> OperationResult + Send + Sync>;

/// Result of a store together with the entity that was written
#[derive(Debug, Clone, PartialEq)]
pub struct StoreOutcome<T> {
    /// Outcome reported by validation or the repository
    pub result: OperationResult,
    /// The stamped entity, present only on success
    pub record: Option<T>,
}

/// Id guard failure as a result value
fn rejected_id(err: &DomainError) -> OperationResult {
    match err {
        DomainError::EmptyId => OperationResult::failure("Invalid ID", vec!["ID cannot be empty".into()]),
        _ => OperationResult::failure("Invalid ID format", vec!["ID must be a valid UUID".into()]),
    }
}

/// Store, fetch, existence and delete operations for one entity type
pub struct EntityService<T, R> {
    repository: R,
    validator: Validator<T>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity, R: Repository<T>> EntityService<T, R> {
    /// Service that accepts every entity
    pub fn new(repository: R) -> Self {
        Self::with_validator(repository, |_: &T| OperationResult::ok(VALIDATION_SUCCESSFUL))
    }

    /// Service running `validator` before each store
    pub fn with_validator<F>(repository: R, validator: F) -> Self
    where
        F: Fn(&T) -> OperationResult + Send + Sync + 'static,
    {
        Self {
            repository,
            validator: Arc::new(validator),
            _entity: PhantomData,
        }
    }

    /// Service validating entities against `schema`
    pub fn with_schema(repository: R, schema: &'static Schema) -> Self {
        Self::with_validator(repository, move |entity: &T| schema.validate(entity))
    }

    /// The wrapped repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Run the injected validation
    pub fn validate_entity(&self, entity: &T) -> OperationResult {
        (self.validator)(entity)
    }

    /// Create or update depending on whether the id is already stored
    pub async fn store_record(&self, command: StoreEntityCommand<T>) -> OperationResult {
        self.store_and_return(command).await.result
    }

    /// Like [`store_record`](Self::store_record), also returning the stamped
    /// entity on success
    pub async fn store_and_return(&self, command: StoreEntityCommand<T>) -> StoreOutcome<T> {
        let StoreEntityCommand {
            mut entity,
            user_id,
        } = command;

        let validation = self.validate_entity(&entity);
        if !validation.success {
            warn!(kind = T::KIND, id = %entity.id(), errors = ?validation.errors, "validation rejected entity");
            return StoreOutcome {
                result: validation,
                record: None,
            };
        }

        let now = Utc::now();
        let result = if self.record_exists(entity.id()).await {
            debug!(kind = T::KIND, id = %entity.id(), %user_id, "updating existing record");
            entity.stamp_updated(&user_id, now);
            self.repository.update(&entity).await
        } else {
            debug!(kind = T::KIND, id = %entity.id(), %user_id, "creating new record");
            entity.stamp_created(&user_id, now);
            self.repository.create(&entity).await
        };

        if result.success {
            info!(kind = T::KIND, id = %entity.id(), "{}", result.message);
        } else {
            warn!(kind = T::KIND, id = %entity.id(), errors = ?result.errors, "store failed");
        }

        StoreOutcome {
            record: result.success.then_some(entity),
            result,
        }
    }

    /// Fetch a record after checking the id locally
    pub async fn get_record_by_id(&self, id: &str) -> RecordResult<T> {
        if let Err(err) = parse_record_id(id) {
            debug!(kind = T::KIND, %id, "rejected id on get");
            let rejected = rejected_id(&err);
            return RecordResult::missing(rejected.message, rejected.errors);
        }
        self.repository.get_record_by_id(id).await
    }

    /// Whether a record is stored; `false` for a malformed id
    pub async fn record_exists(&self, id: &str) -> bool {
        if parse_record_id(id).is_err() {
            debug!(kind = T::KIND, %id, "rejected id on exists");
            return false;
        }
        self.repository.record_exists(id).await
    }

    /// Delete a record; `false` for a malformed id
    pub async fn delete_record(&self, id: &str) -> bool {
        if parse_record_id(id).is_err() {
            debug!(kind = T::KIND, %id, "rejected id on delete");
            return false;
        }
        self.repository.delete(id).await
    }
}
