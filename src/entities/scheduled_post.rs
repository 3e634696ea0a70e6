// Copyright 2025 Cowboy AI, LLC.

//! Scheduled posts and the audited lists that hold them

use crate::entity::{AuditFields, Entity};
use crate::schema::{Field, Schema, SchemaErrors};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// Field rules for a single post
pub static SCHEDULED_POST_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(vec![
        Field::required("id").string().uuid(),
        Field::required("title").string().non_empty(),
        Field::required("body").string().non_empty(),
        Field::required("mediaList").array_of(Field::element().string().uuid()),
        Field::required("accountId").string().uuid(),
        Field::required("status").string().non_empty(),
        Field::required("hashtags").array_of(Field::element().string().non_empty()),
        Field::required("targetPlatforms").array_of(Field::element().string().non_empty()),
        Field::required("scheduledTime").timestamp(),
    ])
});

/// Field rules for a post list; each post is checked with
/// [`SCHEDULED_POST_SCHEMA`]
pub static SCHEDULED_POST_LIST_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(vec![
        Field::required("id").string().uuid(),
        Field::optional("posts")
            .array_of(Field::element().object(SCHEDULED_POST_SCHEMA.clone())),
        Field::optional("createdAt").timestamp(),
        Field::nullable("updatedAt").timestamp(),
        Field::required("createdBy").string(),
        Field::optional("updatedBy").string(),
    ])
});

/// One post waiting to be published
///
/// Posts are values inside a [`ScheduledPostList`]; they carry no audit
/// metadata of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPost {
    /// Post identifier
    pub id: String,
    /// Title
    pub title: String,
    /// Body text
    pub body: String,
    /// Ids of attached media files
    pub media_list: Vec<String>,
    /// Account the post is published from
    pub account_id: String,
    /// Publishing status, e.g. `draft` or `scheduled`
    pub status: String,
    /// Hashtags without the leading `#`
    pub hashtags: Vec<String>,
    /// Platforms to publish to
    pub target_platforms: Vec<String>,
    /// When to publish
    pub scheduled_time: DateTime<Utc>,
}

/// Audited container of scheduled posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScheduledPostList {
    /// Audit metadata
    #[serde(flatten)]
    pub audit: AuditFields,
    /// The posts, in publishing order
    #[serde(default)]
    pub posts: Vec<ScheduledPost>,
}

impl ScheduledPostList {
    /// Empty list created now
    pub fn new(id: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            audit: AuditFields::new(id, created_by),
            posts: Vec::new(),
        }
    }

    /// Same list with `posts` as its contents
    pub fn with_posts(mut self, posts: Vec<ScheduledPost>) -> Self {
        self.posts = posts;
        self
    }

    /// Check an untrusted payload
    pub fn validate(input: &Value) -> Result<ScheduledPostList, SchemaErrors> {
        SCHEDULED_POST_LIST_SCHEMA.parse(input)
    }

    /// Posts due at or before `now`
    pub fn due(&self, now: DateTime<Utc>) -> impl Iterator<Item = &ScheduledPost> {
        self.posts.iter().filter(move |post| post.scheduled_time <= now)
    }
}

impl Entity for ScheduledPostList {
    const KIND: &'static str = "ScheduledPostList";

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn post_json() -> Value {
        json!({
            "id": "0b7e7c0a-4c1e-4d55-9d0a-6f3a1c2b9e11",
            "title": "Launch",
            "body": "We are live",
            "mediaList": ["5f0c7a3e-2b1d-4c8e-9f6a-1d2e3f4a5b6c"],
            "accountId": "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d",
            "status": "scheduled",
            "hashtags": ["launch"],
            "targetPlatforms": ["facebook"],
            "scheduledTime": "2025-06-01T09:00:00Z"
        })
    }

    #[test]
    fn test_list_defaults_created_at() {
        let before = Utc::now();
        let list = ScheduledPostList::validate(&json!({
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "createdBy": "u1",
            "updatedAt": null
        }))
        .unwrap();

        assert!(list.posts.is_empty());
        assert!(list.audit.created_at >= before);
        assert!(list.audit.updated_at.is_none());
    }

    #[test]
    fn test_nested_post_errors_are_located() {
        let mut bad = post_json();
        bad["title"] = json!("");
        bad["mediaList"] = json!(["not-a-uuid"]);
        bad["hashtags"] = json!([""]);

        let errors = ScheduledPostList::validate(&json!({
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "createdBy": "u1",
            "posts": [post_json(), bad]
        }))
        .unwrap_err();

        assert_eq!(
            errors.messages(),
            vec![
                "posts.1.title: String must contain at least 1 character(s)",
                "posts.1.mediaList.0: Invalid uuid",
                "posts.1.hashtags.0: String must contain at least 1 character(s)",
            ]
        );
    }

    #[test]
    fn test_valid_list_decodes_posts() {
        let list = ScheduledPostList::validate(&json!({
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "createdBy": "u1",
            "createdAt": "2025-01-01T00:00:00Z",
            "posts": [post_json()]
        }))
        .unwrap();

        assert_eq!(list.posts.len(), 1);
        assert_eq!(list.posts[0].target_platforms, vec!["facebook"]);
        assert_eq!(
            list.posts[0].scheduled_time,
            Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_due_filters_by_schedule() {
        let post: ScheduledPost = serde_json::from_value(post_json()).unwrap();
        let mut later = post.clone();
        later.scheduled_time = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

        let list = ScheduledPostList::new("123e4567-e89b-12d3-a456-426614174000", "u1")
            .with_posts(vec![post.clone(), later]);

        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let due: Vec<_> = list.due(now).collect();
        assert_eq!(due, vec![&post]);
    }

    #[test]
    fn test_serialized_list_passes_its_schema() {
        let post: ScheduledPost = serde_json::from_value(post_json()).unwrap();
        let list = ScheduledPostList::new("123e4567-e89b-12d3-a456-426614174000", "u1")
            .with_posts(vec![post]);
        let json = serde_json::to_value(&list).unwrap();
        assert!(SCHEDULED_POST_LIST_SCHEMA.check(&json).is_empty());
    }
}
