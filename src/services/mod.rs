// Copyright 2025 Cowboy AI, LLC.

//! Services: validation, id guarding and the create-or-update decision
//!
//! Every operation reports through [`OperationResult`](crate::OperationResult)
//! or [`RecordResult`](crate::RecordResult); nothing here returns `Err`.

pub mod action_items;
pub mod entity_service;
pub mod media_files;
pub mod scheduled_posts;

pub use action_items::{ActionItemService, ActionItemStored};
pub use entity_service::{EntityService, StoreOutcome, Validator};
pub use media_files::{media_file_service, MediaFileService};
pub use scheduled_posts::{scheduled_posts_service, ScheduledPostsService};
