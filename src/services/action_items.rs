// Copyright 2025 Cowboy AI, LLC.

//! Action item service

use super::entity_service::EntityService;
use crate::commands::StoreEntityCommand;
use crate::entities::{ActionItem, ACTION_ITEM_SCHEMA};
use crate::persistence::Repository;
use crate::results::OperationResult;
use std::ops::Deref;

/// Result of [`ActionItemService::store_action_item`]
#[derive(Debug, Clone, PartialEq)]
pub struct ActionItemStored {
    /// Outcome of the store
    pub result: OperationResult,
    /// The stored item, present only on success
    pub action_item: Option<ActionItem>,
}

/// Generic entity service wired to the action item schema
///
/// Dereferences to [`EntityService`] for the shared operations.
pub struct ActionItemService<R> {
    inner: EntityService<ActionItem, R>,
}

impl<R: Repository<ActionItem>> ActionItemService<R> {
    /// Service over `repository`
    pub fn new(repository: R) -> Self {
        Self {
            inner: EntityService::with_schema(repository, &ACTION_ITEM_SCHEMA),
        }
    }

    /// Validate and store, echoing back the stored item on success
    pub async fn store_action_item(&self, command: StoreEntityCommand<ActionItem>) -> ActionItemStored {
        let outcome = self.inner.store_and_return(command).await;
        ActionItemStored {
            result: outcome.result,
            action_item: outcome.record,
        }
    }
}

impl<R> Deref for ActionItemService<R> {
    type Target = EntityService<ActionItem, R>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
