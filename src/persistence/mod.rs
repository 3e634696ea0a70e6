// Copyright 2025 Cowboy AI, LLC.

//! # Persistence Layer
//!
//! Entities are stored one document per record in named collections. The
//! [`Repository`] trait is the seam the services depend on;
//! [`DocumentRepository`] implements it over any [`DocumentStore`].
//!
//! ## Components
//!
//! - **Document stores**: [`InMemoryDocumentStore`] and the NATS JetStream
//!   key-value backed [`NatsKvDocumentStore`]
//! - **Timestamp conversion**: audit timestamps are written as
//!   [`StoreTimestamp`] values and read back as `DateTime<Utc>`
//! - **Queries**: field filters over a whole collection
//! - **Metrics**: [`InstrumentedRepository`] counts calls and outcomes

pub mod document;
pub mod document_repository;
pub mod instrumented_repository;
pub mod memory_store;
pub mod metrics;
pub mod nats_kv_store;
pub mod query;
pub mod repository;

pub use document::{
    from_document, to_document, Document, DocumentStore, StoreTimestamp, AUDIT_TIMESTAMP_FIELDS,
};
pub use document_repository::{DocumentRepository, DocumentRepositoryConfig};
pub use instrumented_repository::InstrumentedRepository;
pub use memory_store::InMemoryDocumentStore;
pub use metrics::{DurationStats, MetricsSummary, MetricsTimer, PersistenceMetrics};
pub use nats_kv_store::{collection_ids, document_key, NatsKvConfig, NatsKvDocumentStore};
pub use query::{FieldFilter, QueryOperator};
pub use repository::{validate_audit_fields, Repository, VALIDATION_FAILED, VALIDATION_PASSED};
