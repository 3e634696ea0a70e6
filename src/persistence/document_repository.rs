// Copyright 2025 Cowboy AI, LLC.

//! [`Repository`] over any [`DocumentStore`]

use super::document::{from_document, to_document, Document, DocumentStore};
use super::query::{FieldFilter, QueryOperator};
use super::repository::{validate_audit_fields, Repository};
use crate::entity::Entity;
use crate::errors::DomainResult;
use crate::results::{OperationResult, RecordResult};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, error};

/// Per-repository settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRepositoryConfig {
    /// Collection the repository reads and writes
    pub collection_name: String,
}

impl DocumentRepositoryConfig {
    /// Settings for `collection_name`
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
        }
    }
}

/// Entity repository storing one document per record
///
/// The store handle is shared; clones of the repository write to the same
/// collection.
pub struct DocumentRepository<T> {
    store: Arc<dyn DocumentStore>,
    config: DocumentRepositoryConfig,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for DocumentRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> DocumentRepository<T> {
    /// Repository over `store` using `config`
    pub fn new(store: Arc<dyn DocumentStore>, config: DocumentRepositoryConfig) -> Self {
        Self {
            store,
            config,
            _entity: PhantomData,
        }
    }

    /// Collection in use
    pub fn collection(&self) -> &str {
        &self.config.collection_name
    }

    async fn write(&self, record: &T) -> DomainResult<()> {
        let document = to_document(record)?;
        self.store.set(self.collection(), record.id(), document).await
    }

    fn decode(document: Document) -> DomainResult<T> {
        Ok(serde_json::from_value(from_document(document))?)
    }

    async fn load_matching(&self, filter: Option<&FieldFilter>) -> DomainResult<Vec<T>> {
        let documents = self.store.list(self.collection()).await?;
        let mut records = Vec::with_capacity(documents.len());
        for (_, document) in documents {
            let value = from_document(document);
            if filter.is_some_and(|filter| !filter.matches(&value)) {
                continue;
            }
            records.push(serde_json::from_value(value)?);
        }
        Ok(records)
    }

    /// Every record in the collection
    pub async fn get_all_records(&self) -> RecordResult<Vec<T>> {
        match self.load_matching(None).await {
            Ok(records) if records.is_empty() => RecordResult::found("No records found", records),
            Ok(records) => {
                RecordResult::found(format!("Retrieved {} records", records.len()), records)
            }
            Err(err) => {
                error!(collection = %self.collection(), error = %err, "failed to list records");
                RecordResult::missing(
                    format!("Failed to retrieve records: {}", err.detail()),
                    vec![err.detail()],
                )
            }
        }
    }

    /// Records whose `field` satisfies `operator` against `value`
    pub async fn query_records(
        &self,
        field: &str,
        operator: QueryOperator,
        value: Value,
    ) -> RecordResult<Vec<T>> {
        let filter = FieldFilter::new(field, operator, value);
        match self.load_matching(Some(&filter)).await {
            Ok(records) if records.is_empty() => {
                RecordResult::found("No records found matching the query", records)
            }
            Ok(records) => {
                RecordResult::found(format!("Retrieved {} records", records.len()), records)
            }
            Err(err) => {
                error!(
                    collection = %self.collection(),
                    %field,
                    %operator,
                    error = %err,
                    "failed to query records"
                );
                RecordResult::missing(
                    format!("Failed to query records: {}", err.detail()),
                    vec![err.detail()],
                )
            }
        }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for DocumentRepository<T> {
    async fn create(&self, item: &T) -> OperationResult {
        let validation = self.validate(item);
        if !validation.success {
            return validation;
        }

        let mut record = item.clone();
        record.audit_mut().created_at = Utc::now();
        record.audit_mut().updated_at = None;

        match self.write(&record).await {
            Ok(()) => {
                debug!(collection = %self.collection(), id = %record.id(), "entity created");
                OperationResult::ok(format!(
                    "Entity created successfully with ID: {}",
                    record.id()
                ))
            }
            Err(err) => {
                error!(collection = %self.collection(), id = %record.id(), error = %err, "create failed");
                OperationResult::fail(vec![format!("Failed to create entity: {}", err.detail())])
            }
        }
    }

    async fn update(&self, item: &T) -> OperationResult {
        let validation = self.validate(item);
        if !validation.success {
            return validation;
        }

        let id = item.id();
        match self.store.get(self.collection(), id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return OperationResult::fail(vec![format!("Entity with ID {id} does not exist")]);
            }
            Err(err) => {
                error!(collection = %self.collection(), %id, error = %err, "update lookup failed");
                return OperationResult::fail(vec![format!(
                    "Failed to update entity: {}",
                    err.detail()
                )]);
            }
        }

        let mut record = item.clone();
        record.audit_mut().updated_at = Some(Utc::now());

        match self.write(&record).await {
            Ok(()) => {
                debug!(collection = %self.collection(), %id, "entity updated");
                OperationResult::ok(format!("Entity updated successfully with ID: {id}"))
            }
            Err(err) => {
                error!(collection = %self.collection(), %id, error = %err, "update failed");
                OperationResult::fail(vec![format!("Failed to update entity: {}", err.detail())])
            }
        }
    }

    async fn delete(&self, id: &str) -> bool {
        if id.trim().is_empty() {
            return false;
        }
        match self.store.delete(self.collection(), id).await {
            Ok(()) => true,
            Err(err) => {
                error!(collection = %self.collection(), %id, error = %err, "delete failed");
                false
            }
        }
    }

    async fn get_record_by_id(&self, id: &str) -> RecordResult<T> {
        if id.trim().is_empty() {
            return RecordResult::missing("", Vec::new());
        }
        let loaded = match self.store.get(self.collection(), id).await {
            Ok(Some(document)) => Self::decode(document),
            Ok(None) => {
                return RecordResult::missing(format!("Entity with ID {id} not found"), Vec::new())
            }
            Err(err) => Err(err),
        };
        match loaded {
            Ok(record) => RecordResult::found("Entity retrieved successfully", record),
            Err(err) => {
                error!(collection = %self.collection(), %id, error = %err, "get failed");
                RecordResult::missing(
                    format!("Failed to retrieve entity: {}", err.detail()),
                    vec![err.detail()],
                )
            }
        }
    }

    async fn record_exists(&self, id: &str) -> bool {
        if id.trim().is_empty() {
            return false;
        }
        match self.store.get(self.collection(), id).await {
            Ok(document) => document.is_some(),
            Err(err) => {
                error!(collection = %self.collection(), %id, error = %err, "existence check failed");
                false
            }
        }
    }

    fn validate(&self, item: &T) -> OperationResult {
        validate_audit_fields(item)
    }
}
