// Copyright 2025 Cowboy AI, LLC.

//! Media file service

use super::entity_service::EntityService;
use crate::entities::{MediaFile, MEDIA_FILE_SCHEMA};
use crate::persistence::Repository;

/// Entity service for media files
pub type MediaFileService<R> = EntityService<MediaFile, R>;

/// Media file service over `repository`, validating with the media file schema
pub fn media_file_service<R: Repository<MediaFile>>(repository: R) -> MediaFileService<R> {
    EntityService::with_schema(repository, &MEDIA_FILE_SCHEMA)
}
