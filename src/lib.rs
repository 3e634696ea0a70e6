// Copyright 2025 Cowboy AI, LLC.

//! # Scheduler Domain
//!
//! Validated, audited persistence for the records of a social-media
//! scheduler: action items, media files and scheduled post lists.
//!
//! This crate provides the building blocks of the store-or-update pipeline:
//! - **Entity**: records with identity and audit metadata
//! - **Schema**: declarative field rules with exhaustive error reporting
//! - **Results**: `OperationResult` and `RecordResult`, the only way failures
//!   leave the service boundary
//! - **Repository**: storage capability over a document store, with a
//!   structural audit-field check of its own
//! - **Services**: id guarding, validation and the existence-driven choice
//!   between create and update
//! - **Response**: status mapping for a thin HTTP layer
//!
//! ## Design Principles
//!
//! 1. **Failures are data**: nothing past the repository returns `Err`
//! 2. **Composition**: per-entity behavior is an injected validator
//! 3. **Explicit handles**: stores and connections are passed in, never global
//!
//! ## Example
//!
//! ```rust
//! use scheduler_domain::entities::ActionItem;
//! use scheduler_domain::persistence::{
//!     DocumentRepository, DocumentRepositoryConfig, InMemoryDocumentStore,
//! };
//! use scheduler_domain::services::ActionItemService;
//! use scheduler_domain::StoreEntityCommand;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let repository = DocumentRepository::new(store, DocumentRepositoryConfig::new("action-items"));
//! let service = ActionItemService::new(repository);
//!
//! let item = ActionItem::new(
//!     "123e4567-e89b-12d3-a456-426614174000",
//!     "Write copy",
//!     "Draft the launch post",
//!     "alice",
//!     3,
//!     "alice",
//! );
//! let stored = service
//!     .store_action_item(StoreEntityCommand::new(item, "alice"))
//!     .await;
//! assert!(stored.result.success);
//! # });
//! ```

#![warn(missing_docs)]

mod commands;
mod entity;
mod errors;
mod results;

pub mod config;
pub mod entities;
pub mod identifiers;
pub mod infrastructure;
pub mod persistence;
pub mod response;
pub mod schema;
pub mod services;

// Re-export core types
pub use commands::{RecordIdRequest, StoreEntityCommand};
pub use entity::{AuditFields, Entity};
pub use errors::{DomainError, DomainResult};
pub use results::{OperationResult, RecordResult, OPERATION_FAILED};
pub use schema::{Field, FieldViolation, Schema, SchemaErrors, VALIDATION_SUCCESSFUL};
