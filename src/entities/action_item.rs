// Copyright 2025 Cowboy AI, LLC.

//! Action items: named tasks with an owner and a 1-5 priority

use crate::entity::{AuditFields, Entity};
use crate::schema::{Field, Schema, SchemaErrors};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// Lowest accepted priority
pub const MIN_PRIORITY: u8 = 1;
/// Highest accepted priority
pub const MAX_PRIORITY: u8 = 5;

/// Field rules for action item payloads
///
/// Each priority bound reports its own message so callers can tell which
/// side of the range was violated.
pub static ACTION_ITEM_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(vec![
        Field::required("id").string().uuid(),
        Field::required("name").string().non_empty_with("Name is required"),
        Field::required("description")
            .string()
            .non_empty_with("Description is required"),
        Field::required("owner").string().non_empty_with("Owner is required"),
        Field::required("priority")
            .integer()
            .min_with(f64::from(MIN_PRIORITY), "Priority must be at least 1")
            .max_with(f64::from(MAX_PRIORITY), "Priority must be at most 5"),
        Field::required("createdBy")
            .string()
            .non_empty_with("CreatedBy is required"),
        Field::required("createdAt").timestamp(),
        Field::optional("updatedBy")
            .string()
            .non_empty_with("UpdatedBy is required"),
        Field::optional("updatedAt").timestamp(),
    ])
});

/// Validated, typed action item payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionItemData {
    /// Record identifier
    pub id: String,
    /// Short name
    pub name: String,
    /// Longer description
    pub description: String,
    /// Person responsible
    pub owner: String,
    /// 1 (very low) to 5 (very high)
    pub priority: u8,
    /// Creator
    pub created_by: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last updater
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Field overrides accepted by [`ActionItem::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionItemChanges {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New owner
    pub owner: Option<String>,
    /// New priority
    pub priority: Option<u8>,
}

/// A task tracked by the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActionItem {
    /// Audit metadata
    #[serde(flatten)]
    pub audit: AuditFields,
    /// Short name
    pub name: String,
    /// Longer description
    pub description: String,
    /// Person responsible
    pub owner: String,
    /// 1 (very low) to 5 (very high)
    pub priority: u8,
}

impl ActionItem {
    /// New, never-updated action item created now
    ///
    /// No validation happens here; use [`ActionItem::validate`] for
    /// untrusted input.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
        priority: u8,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            audit: AuditFields::new(id, created_by),
            name: name.into(),
            description: description.into(),
            owner: owner.into(),
            priority,
        }
    }

    /// Check an untrusted payload
    pub fn validate(input: &Value) -> Result<ActionItemData, SchemaErrors> {
        ACTION_ITEM_SCHEMA.parse(input)
    }

    /// Build from validated data
    pub fn from_data(data: ActionItemData) -> Self {
        Self {
            audit: AuditFields {
                id: data.id,
                created_by: data.created_by,
                created_at: data.created_at,
                updated_by: data.updated_by.unwrap_or_default(),
                updated_at: data.updated_at,
            },
            name: data.name,
            description: data.description,
            owner: data.owner,
            priority: data.priority,
        }
    }

    /// Plain representation used for persistence and responses
    pub fn to_object(&self) -> ActionItemData {
        ActionItemData {
            id: self.audit.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            owner: self.owner.clone(),
            priority: self.priority,
            created_by: self.audit.created_by.clone(),
            created_at: self.audit.created_at,
            updated_by: (!self.audit.updated_by.is_empty()).then(|| self.audit.updated_by.clone()),
            updated_at: self.audit.updated_at,
        }
    }

    /// New item with `changes` applied and the update stamp set to now
    ///
    /// The receiver is left untouched.
    pub fn update(&self, changes: ActionItemChanges, updated_by: &str) -> Self {
        Self {
            audit: self.audit.touched(updated_by, Utc::now()),
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            description: changes.description.unwrap_or_else(|| self.description.clone()),
            owner: changes.owner.unwrap_or_else(|| self.owner.clone()),
            priority: changes.priority.unwrap_or(self.priority),
        }
    }

    /// Human readable priority
    pub fn priority_label(&self) -> &'static str {
        match self.priority {
            1 => "Very Low",
            2 => "Low",
            3 => "Medium",
            4 => "High",
            5 => "Very High",
            _ => "Unknown",
        }
    }
}

impl Entity for ActionItem {
    const KIND: &'static str = "ActionItem";

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}
