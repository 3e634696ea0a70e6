// Copyright 2025 Cowboy AI, LLC.

//! Inbound requests accepted at the service boundary
//!
//! Commands carry no validation of their own; the service validates the
//! entity they wrap.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Store an entity on behalf of a user
///
/// Whether this creates or updates is decided by the service from the
/// entity's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreEntityCommand<T> {
    /// Entity payload
    pub entity: T,
    /// Acting user
    pub user_id: String,
}

impl<T> StoreEntityCommand<T> {
    /// Pair `entity` with the acting user
    pub fn new(entity: T, user_id: impl Into<String>) -> Self {
        Self {
            entity,
            user_id: user_id.into(),
        }
    }
}

/// Body of a get or delete request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecordIdRequest {
    /// Record identifier
    #[serde(default)]
    pub id: String,
}

impl RecordIdRequest {
    /// Request for `id`
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
