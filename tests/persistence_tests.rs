//! Integration tests for the store-or-update pipeline

use scheduler_domain::config::StoreConfig;
use scheduler_domain::entities::{ActionItem, MediaFile, ScheduledPost, ScheduledPostList};
use scheduler_domain::infrastructure::NatsClient;
use scheduler_domain::persistence::{
    DocumentRepository, DocumentRepositoryConfig, InMemoryDocumentStore, InstrumentedRepository,
    NatsKvDocumentStore, QueryOperator,
};
use scheduler_domain::services::{media_file_service, scheduled_posts_service, ActionItemService};
use scheduler_domain::{Entity, StoreEntityCommand};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

const ITEM_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

type InstrumentedItems = InstrumentedRepository<ActionItem, DocumentRepository<ActionItem>>;

fn action_item_service(store: Arc<InMemoryDocumentStore>) -> ActionItemService<InstrumentedItems> {
    let repository = DocumentRepository::new(store, DocumentRepositoryConfig::new("action-items"));
    ActionItemService::new(InstrumentedRepository::new(repository))
}

fn item(priority: u8) -> ActionItem {
    ActionItem::new(ITEM_ID, "Write copy", "Draft the launch post", "alice", priority, "payload")
}

#[tokio::test]
async fn test_create_then_update_keeps_creator() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let service = action_item_service(store.clone());

    let created = service
        .store_action_item(StoreEntityCommand::new(item(3), "u1"))
        .await;
    assert!(created.result.success);
    assert_eq!(
        created.result.message,
        format!("Entity created successfully with ID: {ITEM_ID}")
    );
    let first = created.action_item.expect("created item echoed");
    assert_eq!(first.created_by(), "u1");
    assert!(first.updated_at().is_none());

    let mut edited = first.clone();
    edited.priority = 5;
    let updated = service
        .store_action_item(StoreEntityCommand::new(edited, "u2"))
        .await;
    assert!(updated.result.success);
    assert_eq!(
        updated.result.message,
        format!("Entity updated successfully with ID: {ITEM_ID}")
    );

    let stored = service
        .get_record_by_id(ITEM_ID)
        .await
        .into_record()
        .expect("record stored");
    assert_eq!(stored.created_by(), "u1");
    assert_eq!(stored.updated_by(), "u2");
    assert!(stored.updated_at().is_some());
    assert_eq!(stored.priority, 5);
    assert_eq!(store.len("action-items").await, 1);

    let metrics = service.repository().metrics();
    assert_eq!(metrics.get_counter("repository.create.success").await, 1);
    assert_eq!(metrics.get_counter("repository.update.success").await, 1);
    assert_eq!(metrics.get_counter("repository.exists.miss").await, 1);
    assert_eq!(metrics.get_counter("repository.exists.hit").await, 1);
}

#[tokio::test]
async fn test_invalid_priority_never_reaches_store() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let service = action_item_service(store.clone());

    let stored = service
        .store_action_item(StoreEntityCommand::new(item(10), "u1"))
        .await;

    assert!(!stored.result.success);
    assert_eq!(stored.result.errors, vec!["priority: Priority must be at most 5"]);
    assert!(stored.action_item.is_none());
    assert!(store.is_empty("action-items").await);

    let summary = service.repository().metrics().summary().await;
    assert!(summary.counters.is_empty());
}

#[tokio::test]
async fn test_delete_removes_record() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let service = action_item_service(store.clone());
    service
        .store_action_item(StoreEntityCommand::new(item(2), "u1"))
        .await;

    assert!(service.record_exists(ITEM_ID).await);
    assert!(service.delete_record(ITEM_ID).await);
    assert!(!service.record_exists(ITEM_ID).await);

    let missing = service.get_record_by_id(ITEM_ID).await;
    assert!(!missing.success);
    assert_eq!(missing.message, format!("Entity with ID {ITEM_ID} not found"));
}

#[tokio::test]
async fn test_malformed_id_is_rejected_locally() {
    let service = action_item_service(Arc::new(InMemoryDocumentStore::new()));

    let result = service.get_record_by_id("not-a-uuid").await;

    assert!(!result.success);
    assert_eq!(result.message, "Invalid ID format");
    assert_eq!(result.errors, vec!["ID must be a valid UUID"]);
    let summary = service.repository().metrics().summary().await;
    assert!(summary.counters.is_empty());
}

#[tokio::test]
async fn test_services_share_one_store() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let config = StoreConfig::default();

    let media = media_file_service(DocumentRepository::<MediaFile>::new(
        store.clone(),
        config.media_files(),
    ));
    let posts = scheduled_posts_service(DocumentRepository::<ScheduledPostList>::new(
        store.clone(),
        config.scheduled_posts(),
    ));

    let file = MediaFile::new(ITEM_ID, "cover.png", "image/png", 2048, "seed");
    assert!(media.store_record(StoreEntityCommand::new(file, "u1")).await.success);

    let post = ScheduledPost {
        id: "0b7e7c0a-4c1e-4d55-9d0a-6f3a1c2b9e11".to_string(),
        title: "Launch".to_string(),
        body: "We are live".to_string(),
        media_list: vec![ITEM_ID.to_string()],
        account_id: "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d".to_string(),
        status: "scheduled".to_string(),
        hashtags: vec!["launch".to_string()],
        target_platforms: vec!["x".to_string()],
        scheduled_time: Utc::now() - Duration::minutes(5),
    };
    let list = ScheduledPostList::new(ITEM_ID, "seed").with_posts(vec![post]);
    assert!(posts.store_record(StoreEntityCommand::new(list, "u1")).await.success);

    assert_eq!(store.len("media-files").await, 1);
    assert_eq!(store.len("scheduled-posts").await, 1);
    let loaded = posts
        .get_record_by_id(ITEM_ID)
        .await
        .into_record()
        .expect("post list stored");
    assert_eq!(loaded.due(Utc::now()).count(), 1);
    assert_eq!(
        media.get_record_by_id(ITEM_ID).await.into_record().map(|file| file.size),
        Some(2048)
    );
}

#[tokio::test]
async fn test_query_records_filters_collection() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let repository =
        DocumentRepository::<ActionItem>::new(store, DocumentRepositoryConfig::new("action-items"));
    let service = ActionItemService::new(repository.clone());

    let ids = [
        "6f1c2d3e-4b5a-4c6d-8e7f-9a0b1c2d3e4f",
        "7a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5d",
        "8b3c4d5e-6f7a-4b8c-9d0e-1f2a3b4c5d6e",
    ];
    for (index, id) in ids.iter().enumerate() {
        let entity = ActionItem::new(*id, "task", "desc", "bob", index as u8 + 1, "seed");
        assert!(service.store_record(StoreEntityCommand::new(entity, "u1")).await.success);
    }

    let urgent = repository
        .query_records("priority", QueryOperator::GreaterThanOrEqual, json!(2))
        .await;
    assert!(urgent.success);
    assert_eq!(urgent.record.map(|items| items.len()), Some(2));

    let all = repository.get_all_records().await;
    assert_eq!(all.record.map(|items| items.len()), Some(3));
}

#[tokio::test]
#[ignore] // Requires NATS server with JetStream enabled
async fn test_nats_kv_round_trip() {
    let config = StoreConfig::from_env();
    let client = NatsClient::connect(config.nats.clone()).await.unwrap();
    let store = NatsKvDocumentStore::open(client.jetstream(), config.kv())
        .await
        .unwrap();
    let repository = DocumentRepository::<ActionItem>::new(Arc::new(store), config.action_items());
    let service = ActionItemService::new(repository);

    let stored = service
        .store_action_item(StoreEntityCommand::new(item(4), "u1"))
        .await;
    assert!(stored.result.success);

    let loaded = service.get_record_by_id(ITEM_ID).await;
    assert!(loaded.success);
    assert!(service.delete_record(ITEM_ID).await);
}
