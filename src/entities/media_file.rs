// Copyright 2025 Cowboy AI, LLC.

//! Uploaded media referenced by scheduled posts

use crate::entity::{AuditFields, Entity};
use crate::schema::{Field, Schema, SchemaErrors};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// Broad media category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    /// Still image
    #[default]
    Image,
    /// Video clip
    Video,
    /// Audio clip
    Audio,
    /// Any other document
    Document,
}

impl FileType {
    /// Wire names of every variant
    pub const NAMES: [&'static str; 4] = ["IMAGE", "VIDEO", "AUDIO", "DOCUMENT"];

    /// Guess the category from a MIME-like type string
    pub fn from_mime(mime: &str) -> Self {
        match mime.split('/').next().unwrap_or_default() {
            "image" => FileType::Image,
            "video" => FileType::Video,
            "audio" => FileType::Audio,
            _ => FileType::Document,
        }
    }
}

/// Field rules for media file payloads
pub static MEDIA_FILE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(vec![
        Field::required("id").string().uuid(),
        Field::required("name").string().non_empty(),
        Field::required("type").string().non_empty(),
        Field::required("size").integer().positive(),
        Field::optional("fileType").string().one_of(&FileType::NAMES),
        Field::optional("url").string(),
        Field::optional("accountId").string(),
        Field::optional("cloudStorageId").string(),
        Field::optional("uploadedAt").timestamp(),
        Field::required("createdBy").string(),
        Field::required("createdAt").timestamp(),
        Field::optional("updatedBy").string(),
        Field::optional("updatedAt").timestamp(),
    ])
});

/// A stored media file and where it lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    /// Audit metadata
    #[serde(flatten)]
    pub audit: AuditFields,
    /// File name
    pub name: String,
    /// MIME-like type string, e.g. `image/png`
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes
    pub size: u64,
    /// Broad category
    #[serde(default)]
    pub file_type: FileType,
    /// Public URL
    #[serde(default)]
    pub url: String,
    /// Owning social account
    #[serde(default)]
    pub account_id: String,
    /// Object id in cloud storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_storage_id: Option<String>,
    /// When the upload finished
    #[serde(default = "Utc::now")]
    pub uploaded_at: DateTime<Utc>,
}

impl MediaFile {
    /// New media file record; the category is derived from `mime_type`
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        created_by: impl Into<String>,
    ) -> Self {
        let mime_type = mime_type.into();
        Self {
            audit: AuditFields::new(id, created_by),
            name: name.into(),
            file_type: FileType::from_mime(&mime_type),
            mime_type,
            size,
            url: String::new(),
            account_id: String::new(),
            cloud_storage_id: None,
            uploaded_at: Utc::now(),
        }
    }

    /// Attach account and cloud storage identifiers
    pub fn stored_at(
        mut self,
        account_id: impl Into<String>,
        cloud_storage_id: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.account_id = account_id.into();
        self.cloud_storage_id = Some(cloud_storage_id.into());
        self.url = url.into();
        self
    }

    /// Check an untrusted payload
    pub fn validate(input: &Value) -> Result<MediaFile, SchemaErrors> {
        MEDIA_FILE_SCHEMA.parse(input)
    }
}

impl Entity for MediaFile {
    const KIND: &'static str = "MediaFile";

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
    use serde_json::json;
    use test_case::test_case;

    fn sample() -> Value {
        json!({
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "name": "launch.png",
            "type": "image/png",
            "size": 2048,
            "createdBy": "user-1",
            "createdAt": "2025-01-01T00:00:00Z"
        })
    }

    #[test]
    fn test_validates_minimal_payload() {
        let file = MediaFile::validate(&sample()).unwrap();
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.file_type, FileType::Image);
        assert_eq!(file.size, 2048);
        assert!(file.cloud_storage_id.is_none());
    }

    #[test]
    fn test_reports_every_violation() {
        let input = json!({
            "id": "bad",
            "name": "",
            "type": "",
            "size": 0,
            "fileType": "GIF",
            "createdBy": "u",
            "createdAt": "2025-01-01T00:00:00Z"
        });
        let errors = MediaFile::validate(&input).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "id: Invalid uuid",
                "name: String must contain at least 1 character(s)",
                "type: String must contain at least 1 character(s)",
                "size: Number must be greater than 0",
                "fileType: Invalid enum value. Expected 'IMAGE' | 'VIDEO' | 'AUDIO' | 'DOCUMENT', received 'GIF'",
            ]
        );
    }

    #[test]
    fn test_negative_size_rejected() {
        let mut input = sample();
        input["size"] = json!(-5);
        assert!(MediaFile::validate(&input).is_err());
    }

    #[test_case("image/jpeg", FileType::Image)]
    #[test_case("video/mp4", FileType::Video)]
    #[test_case("audio/mpeg", FileType::Audio)]
    #[test_case("application/pdf", FileType::Document)]
    #[test_case("", FileType::Document)]
    fn test_file_type_from_mime(mime: &str, expected: FileType) {
        assert_eq!(FileType::from_mime(mime), expected);
    }

    #[test]
    fn test_extended_variant_serializes_identifiers() {
        let file = MediaFile::new(
            "123e4567-e89b-12d3-a456-426614174000",
            "clip.mp4",
            "video/mp4",
            10,
            "u1",
        )
        .stored_at("acct-9", "gs://bucket/clip.mp4", "https://cdn/clip.mp4");

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["fileType"], "VIDEO");
        assert_eq!(json["type"], "video/mp4");
        assert_eq!(json["accountId"], "acct-9");
        assert_eq!(json["cloudStorageId"], "gs://bucket/clip.mp4");

        assert!(MEDIA_FILE_SCHEMA.check(&json).is_empty());
        let back: MediaFile = serde_json::from_value(json).unwrap();
        assert_eq!(back, file);
    }
}
