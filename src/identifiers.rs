// Copyright 2025 Cowboy AI, LLC.

//! Record identifier guards
//!
//! Entities carry their id as a plain string so that malformed input can be
//! represented and rejected. Every lookup or storage key must pass
//! [`parse_record_id`] first.

use crate::errors::{DomainError, DomainResult};
use uuid::Uuid;

/// Length of the canonical hyphenated UUID form
const HYPHENATED_LEN: usize = 36;

/// Parse a record id, requiring the canonical `8-4-4-4-12` hex form
///
/// ```rust
/// use scheduler_domain::identifiers::parse_record_id;
///
/// assert!(parse_record_id("123e4567-e89b-12d3-a456-426614174000").is_ok());
/// assert!(parse_record_id("").is_err());
/// assert!(parse_record_id("not-a-uuid").is_err());
/// ```
pub fn parse_record_id(id: &str) -> DomainResult<Uuid> {
    if id.trim().is_empty() {
        return Err(DomainError::EmptyId);
    }
    if id.len() != HYPHENATED_LEN {
        return Err(DomainError::InvalidIdFormat(id.to_string()));
    }
    Uuid::try_parse(id).map_err(|_| DomainError::InvalidIdFormat(id.to_string()))
}

/// Whether `id` is usable as a record key
pub fn is_valid_record_id(id: &str) -> bool {
    parse_record_id(id).is_ok()
}

/// Generate a fresh record id in canonical form
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}
