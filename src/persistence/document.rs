// Copyright 2025 Cowboy AI, LLC.

//! Documents, native timestamps and the document store seam
//!
//! Stores hold JSON objects. Audit timestamps are written in the store's own
//! [`StoreTimestamp`] form and turned back into RFC 3339 strings on read, so
//! entity types only ever see `DateTime<Utc>`.

use crate::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One stored record
pub type Document = Map<String, Value>;

/// Fields converted between `DateTime<Utc>` and [`StoreTimestamp`]
pub const AUDIT_TIMESTAMP_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

/// Timestamp as the backing store keeps it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoreTimestamp {
    /// Seconds since the Unix epoch
    pub seconds: i64,
    /// Sub-second nanoseconds
    pub nanos: u32,
}

impl StoreTimestamp {
    /// Convert back to a UTC date-time, `None` when out of range
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanos)
    }

    /// Read a timestamp stored as `{"seconds": .., "nanos": ..}`
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        let mut object = Map::new();
        object.insert("seconds".to_string(), Value::from(self.seconds));
        object.insert("nanos".to_string(), Value::from(self.nanos));
        Value::Object(object)
    }
}

impl From<DateTime<Utc>> for StoreTimestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self {
            seconds: at.timestamp(),
            nanos: at.timestamp_subsec_nanos(),
        }
    }
}

/// Serialize `entity` into a document with native audit timestamps
pub fn to_document<T: Serialize>(entity: &T) -> DomainResult<Document> {
    let mut document = match serde_json::to_value(entity)? {
        Value::Object(document) => document,
        other => {
            return Err(DomainError::SerializationError(format!(
                "expected an object, got {other}"
            )))
        }
    };

    for field in AUDIT_TIMESTAMP_FIELDS {
        let parsed = match document.get(field) {
            Some(Value::String(raw)) => DateTime::parse_from_rfc3339(raw)
                .map_err(|err| DomainError::SerializationError(format!("{field}: {err}")))?,
            _ => continue,
        };
        let native = StoreTimestamp::from(parsed.with_timezone(&Utc));
        document.insert(field.to_string(), native.into_value());
    }

    Ok(document)
}

/// Turn a stored document back into entity-shaped JSON
///
/// A missing `createdAt` reads as now. A missing or null `updatedAt` stays
/// absent.
pub fn from_document(mut document: Document) -> Value {
    for field in AUDIT_TIMESTAMP_FIELDS {
        let converted = document
            .get(field)
            .and_then(StoreTimestamp::from_value)
            .and_then(StoreTimestamp::to_datetime);
        if let Some(at) = converted {
            document.insert(field.to_string(), Value::String(rfc3339(at)));
        }
    }

    if matches!(document.get("updatedAt"), Some(Value::Null)) {
        document.remove("updatedAt");
    }
    if !document.contains_key("createdAt") {
        document.insert("createdAt".to_string(), Value::String(rfc3339(Utc::now())));
    }

    Value::Object(document)
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Key-document storage grouped into named collections
///
/// Implementations report failures as [`DomainError`]; deleting an absent
/// document is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document
    async fn get(&self, collection: &str, id: &str) -> DomainResult<Option<Document>>;

    /// Insert or overwrite one document
    async fn set(&self, collection: &str, id: &str, document: Document) -> DomainResult<()>;

    /// Remove one document
    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()>;

    /// Every document in a collection with its id
    async fn list(&self, collection: &str) -> DomainResult<Vec<(String, Document)>>;
}
