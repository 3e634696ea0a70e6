// Copyright 2025 Cowboy AI, LLC.

//! Entity capability with identity and audit metadata

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Audit metadata shared by every stored record
///
/// `id`, `createdBy` and `createdAt` are fixed once a record is created.
/// `updatedBy` stays empty and `updatedAt` absent until the first update.
///
/// # Examples
///
/// ```rust
/// use scheduler_domain::AuditFields;
///
/// let audit = AuditFields::new("123e4567-e89b-12d3-a456-426614174000", "u1");
/// assert!(audit.updated_by.is_empty());
/// assert!(audit.updated_at.is_none());
///
/// let touched = audit.touched("u2", chrono::Utc::now());
/// assert_eq!(touched.created_by, "u1");
/// assert_eq!(touched.updated_by, "u2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditFields {
    /// Record identifier, a hyphenated UUID when used as a key
    pub id: String,
    /// User that first stored the record
    #[serde(default)]
    pub created_by: String,
    /// When the record was first stored
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// User that last updated the record, empty until then
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_by: String,
    /// When the record was last updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AuditFields {
    /// Audit fields for a record created now by `created_by`
    pub fn new(id: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_by: created_by.into(),
            created_at: Utc::now(),
            updated_by: String::new(),
            updated_at: None,
        }
    }

    /// Copy with the update stamp replaced, everything else unchanged
    pub fn touched(&self, updated_by: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            updated_by: updated_by.into(),
            updated_at: Some(at),
            ..self.clone()
        }
    }

    /// Whether the record has been updated at least once
    pub fn was_updated(&self) -> bool {
        self.updated_at.is_some()
    }
}

/// Capability every persisted record type satisfies
///
/// Repositories and services are generic over this trait. Implementors hand
/// out their embedded [`AuditFields`]; the accessors and stamping helpers are
/// provided.
///
/// # Examples
///
/// ```rust
/// use scheduler_domain::{AuditFields, Entity};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Note {
///     #[serde(flatten)]
///     audit: AuditFields,
///     text: String,
/// }
///
/// impl Entity for Note {
///     const KIND: &'static str = "Note";
///
///     fn audit(&self) -> &AuditFields {
///         &self.audit
///     }
///
///     fn audit_mut(&mut self) -> &mut AuditFields {
///         &mut self.audit
///     }
/// }
///
/// let mut note = Note {
///     audit: AuditFields::new("123e4567-e89b-12d3-a456-426614174000", "seed"),
///     text: "hello".to_string(),
/// };
/// note.stamp_created("u1", chrono::Utc::now());
/// assert_eq!(note.created_by(), "u1");
/// ```
pub trait Entity:
    Clone + fmt::Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Name used in logs and metrics
    const KIND: &'static str;

    /// Embedded audit metadata
    fn audit(&self) -> &AuditFields;

    /// Mutable access to the embedded audit metadata
    fn audit_mut(&mut self) -> &mut AuditFields;

    /// Record identifier
    fn id(&self) -> &str {
        &self.audit().id
    }

    /// Creator
    fn created_by(&self) -> &str {
        &self.audit().created_by
    }

    /// Creation time
    fn created_at(&self) -> DateTime<Utc> {
        self.audit().created_at
    }

    /// Last updater, empty when never updated
    fn updated_by(&self) -> &str {
        &self.audit().updated_by
    }

    /// Last update time
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.audit().updated_at
    }

    /// Stamp as newly created by `user_id`
    ///
    /// A new record has no update history, so the update stamp is cleared.
    fn stamp_created(&mut self, user_id: &str, at: DateTime<Utc>) {
        let audit = self.audit_mut();
        audit.created_by = user_id.to_string();
        audit.created_at = at;
        audit.updated_by.clear();
        audit.updated_at = None;
    }

    /// Stamp as updated by `user_id`, leaving the creation stamp alone
    fn stamp_updated(&mut self, user_id: &str, at: DateTime<Utc>) {
        let audit = self.audit_mut();
        audit.updated_by = user_id.to_string();
        audit.updated_at = Some(at);
    }
}
