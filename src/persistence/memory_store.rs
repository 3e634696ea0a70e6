// Copyright 2025 Cowboy AI, LLC.

//! Process-local document store

use super::document::{Document, DocumentStore};
use crate::errors::DomainResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type Collections = HashMap<String, HashMap<String, Document>>;

/// Document store held in memory
///
/// Clones share the same data. Listing returns documents ordered by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryDocumentStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, HashMap::len)
    }

    /// Whether a collection holds no documents
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> DomainResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> DomainResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()> {
        let mut collections = self.collections.write().await;
        if let Some(documents) = collections.get_mut(collection) {
            documents.remove(id);
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> DomainResult<Vec<(String, Document)>> {
        let collections = self.collections.read().await;
        let mut documents: Vec<_> = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(id, document)| (id.clone(), document.clone()))
                    .collect()
            })
            .unwrap_or_default();
        documents.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(name: &str) -> Document {
        let mut document = Document::new();
        document.insert("name".into(), json!(name));
        document
    }

    #[tokio::test]
    async fn test_set_get_overwrite() {
        let store = InMemoryDocumentStore::new();
        assert!(store.get("items", "a").await.unwrap().is_none());

        store.set("items", "a", doc("first")).await.unwrap();
        store.set("items", "a", doc("second")).await.unwrap();

        assert_eq!(store.get("items", "a").await.unwrap(), Some(doc("second")));
        assert_eq!(store.len("items").await, 1);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = InMemoryDocumentStore::new();
        store.set("items", "a", doc("x")).await.unwrap();

        assert!(store.get("files", "a").await.unwrap().is_none());
        assert!(store.is_empty("files").await);
    }

    #[tokio::test]
    async fn test_delete_absent_is_ok() {
        let store = InMemoryDocumentStore::new();
        store.delete("items", "missing").await.unwrap();

        store.set("items", "a", doc("x")).await.unwrap();
        store.delete("items", "a").await.unwrap();
        assert!(store.get("items", "a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_shared_between_clones() {
        let store = InMemoryDocumentStore::new();
        let clone = store.clone();
        clone.set("items", "b", doc("b")).await.unwrap();
        clone.set("items", "a", doc("a")).await.unwrap();

        let ids: Vec<String> = store
            .list("items")
            .await
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(store.list("nothing").await.unwrap().is_empty());
    }
}
