// Copyright 2025 Cowboy AI, LLC.

//! Document store backed by a NATS JetStream key-value bucket

use super::document::{Document, DocumentStore};
use crate::errors::{DomainError, DomainResult};
use async_nats::jetstream::{self, kv};
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the key-value bucket
#[derive(Debug, Clone)]
pub struct NatsKvConfig {
    /// KV bucket name
    pub bucket_name: String,
    /// History depth for KV entries
    pub history: i64,
    /// TTL for entries (0 = no expiry)
    pub ttl_seconds: u64,
}

impl Default for NatsKvConfig {
    fn default() -> Self {
        Self {
            bucket_name: "scheduler".to_string(),
            history: 10,
            ttl_seconds: 0,
        }
    }
}

impl NatsKvConfig {
    /// Default settings for `bucket_name`
    pub fn for_bucket(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            ..Self::default()
        }
    }
}

/// Build the KV key for a document
///
/// Collection and id are joined with `.`, so every collection is its own
/// key prefix.
pub fn document_key(collection: &str, id: &str) -> String {
    format!("{collection}.{id}")
}

/// Sorted ids of the keys that belong to `collection`
pub fn collection_ids<I>(collection: &str, keys: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let prefix = document_key(collection, "");
    let mut ids: Vec<String> = keys
        .into_iter()
        .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
        .filter(|id| !id.is_empty())
        .collect();
    ids.sort();
    ids
}

/// JetStream KV implementation of [`DocumentStore`]
#[derive(Clone)]
pub struct NatsKvDocumentStore {
    store: kv::Store,
    config: NatsKvConfig,
}

impl NatsKvDocumentStore {
    /// Open the configured bucket, creating it when missing
    pub async fn open(jetstream: &jetstream::Context, config: NatsKvConfig) -> DomainResult<Self> {
        let store = match jetstream.get_key_value(&config.bucket_name).await {
            Ok(store) => store,
            Err(_) => {
                info!(bucket = %config.bucket_name, "creating key-value bucket");
                jetstream
                    .create_key_value(kv::Config {
                        bucket: config.bucket_name.clone(),
                        history: config.history,
                        max_age: Duration::from_secs(config.ttl_seconds),
                        storage: jetstream::stream::StorageType::File,
                        ..Default::default()
                    })
                    .await
                    .map_err(|e| {
                        DomainError::ConnectionFailed(format!("Failed to create KV bucket: {e}"))
                    })?
            }
        };

        Ok(Self { store, config })
    }

    /// The bucket settings in use
    pub fn config(&self) -> &NatsKvConfig {
        &self.config
    }
}

#[async_trait]
impl DocumentStore for NatsKvDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> DomainResult<Option<Document>> {
        let key = document_key(collection, id);
        match self.store.get(&key).await {
            Ok(Some(entry)) => Ok(Some(serde_json::from_slice(&entry)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(DomainError::storage(format!("Failed to load {key}: {e}"))),
        }
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> DomainResult<()> {
        let key = document_key(collection, id);
        let payload = Bytes::from(serde_json::to_vec(&document)?);
        let revision = self
            .store
            .put(&key, payload)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to save {key}: {e}")))?;
        debug!(%key, revision, "document written");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()> {
        let key = document_key(collection, id);
        self.store
            .delete(&key)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete {key}: {e}")))
    }

    async fn list(&self, collection: &str) -> DomainResult<Vec<(String, Document)>> {
        let keys: Vec<String> = self
            .store
            .keys()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list keys: {e}")))?
            .try_collect()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list keys: {e}")))?;

        // keys() skips entries whose latest revision is a delete or purge;
        // a key removed between listing and fetching reads back as None.
        let mut documents = Vec::new();
        for id in collection_ids(collection, keys) {
            if let Some(document) = self.get(collection, &id).await? {
                documents.push((id, document));
            }
        }
        Ok(documents)
    }
}
