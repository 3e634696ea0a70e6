// Copyright 2025 Cowboy AI, LLC.

//! Runtime configuration loaded from the environment

use crate::infrastructure::NatsConfig;
use crate::persistence::{DocumentRepositoryConfig, NatsKvConfig};
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable holding the NATS server url
pub const NATS_URL_VAR: &str = "SCHEDULER_NATS_URL";
/// Environment variable holding the NATS user
pub const NATS_USER_VAR: &str = "SCHEDULER_NATS_USER";
/// Environment variable holding the NATS password
pub const NATS_PASSWORD_VAR: &str = "SCHEDULER_NATS_PASSWORD";
/// Environment variable holding the key-value bucket name
pub const KV_BUCKET_VAR: &str = "SCHEDULER_KV_BUCKET";
/// Environment variable overriding the action item collection
pub const ACTION_ITEMS_COLLECTION_VAR: &str = "SCHEDULER_ACTION_ITEMS_COLLECTION";
/// Environment variable overriding the media file collection
pub const MEDIA_FILES_COLLECTION_VAR: &str = "SCHEDULER_MEDIA_FILES_COLLECTION";
/// Environment variable overriding the scheduled post collection
pub const SCHEDULED_POSTS_COLLECTION_VAR: &str = "SCHEDULER_SCHEDULED_POSTS_COLLECTION";

/// Collection name per entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNames {
    /// Action items
    pub action_items: String,
    /// Media files
    pub media_files: String,
    /// Scheduled post lists
    pub scheduled_posts: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            action_items: "action-items".to_string(),
            media_files: "media-files".to_string(),
            scheduled_posts: "scheduled-posts".to_string(),
        }
    }
}

/// Everything needed to open the document store and its repositories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// NATS connection settings
    pub nats: NatsConfig,
    /// Key-value bucket holding every collection
    pub bucket: String,
    /// Collection names
    pub collections: CollectionNames,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            nats: NatsConfig::default(),
            bucket: NatsKvConfig::default().bucket_name,
            collections: CollectionNames::default(),
        }
    }
}

impl StoreConfig {
    /// Load from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            nats: NatsConfig {
                url: get(NATS_URL_VAR).unwrap_or(defaults.nats.url),
                user: get(NATS_USER_VAR),
                password: get(NATS_PASSWORD_VAR),
                ..defaults.nats
            },
            bucket: get(KV_BUCKET_VAR).unwrap_or(defaults.bucket),
            collections: CollectionNames {
                action_items: get(ACTION_ITEMS_COLLECTION_VAR)
                    .unwrap_or(defaults.collections.action_items),
                media_files: get(MEDIA_FILES_COLLECTION_VAR)
                    .unwrap_or(defaults.collections.media_files),
                scheduled_posts: get(SCHEDULED_POSTS_COLLECTION_VAR)
                    .unwrap_or(defaults.collections.scheduled_posts),
            },
        }
    }

    /// Key-value bucket settings
    pub fn kv(&self) -> NatsKvConfig {
        NatsKvConfig::for_bucket(self.bucket.clone())
    }

    /// Repository settings for action items
    pub fn action_items(&self) -> DocumentRepositoryConfig {
        DocumentRepositoryConfig::new(self.collections.action_items.clone())
    }

    /// Repository settings for media files
    pub fn media_files(&self) -> DocumentRepositoryConfig {
        DocumentRepositoryConfig::new(self.collections.media_files.clone())
    }

    /// Repository settings for scheduled post lists
    pub fn scheduled_posts(&self) -> DocumentRepositoryConfig {
        DocumentRepositoryConfig::new(self.collections.scheduled_posts.clone())
    }
}
