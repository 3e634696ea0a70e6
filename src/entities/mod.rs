// Copyright 2025 Cowboy AI, LLC.

//! Concrete record types stored by the scheduler
//!
//! Each type embeds [`AuditFields`](crate::AuditFields), implements
//! [`Entity`](crate::Entity) and ships a [`Schema`](crate::schema::Schema)
//! describing its legal payloads.

pub mod action_item;
pub mod media_file;
pub mod scheduled_post;

pub use action_item::{
    ActionItem, ActionItemChanges, ActionItemData, ACTION_ITEM_SCHEMA, MAX_PRIORITY,
    MIN_PRIORITY,
};
pub use media_file::{FileType, MediaFile, MEDIA_FILE_SCHEMA};
pub use scheduled_post::{
    ScheduledPost, ScheduledPostList, SCHEDULED_POST_LIST_SCHEMA, SCHEDULED_POST_SCHEMA,
};
