// Copyright 2025 Cowboy AI, LLC.

//! Uniform outcome values returned across the service boundary
//!
//! Every operation that can fail reports through one of these types instead
//! of returning `Err`. They are built fresh per call and never persisted.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Message used by [`OperationResult::fail`]
pub const OPERATION_FAILED: &str = "Operation failed";

/// Outcome of an operation that carries no payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human readable summary
    pub message: String,
    /// Machine inspectable error strings
    #[serde(default)]
    pub errors: Vec<String>,
}

impl OperationResult {
    /// Build a result from its parts
    pub fn new(success: bool, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success,
            message: message.into(),
            errors,
        }
    }

    /// Successful result with a message
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(true, message, Vec::new())
    }

    /// Failed result with the generic message and the given errors
    pub fn fail(errors: Vec<String>) -> Self {
        Self::new(false, OPERATION_FAILED, errors)
    }

    /// Failed result with a specific message
    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::new(false, message, errors)
    }

    /// Whether this is a failure
    pub fn is_failure(&self) -> bool {
        !self.success
    }
}

/// Outcome of an operation that may carry a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RecordResult<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human readable summary
    pub message: String,
    /// Machine inspectable error strings
    #[serde(default)]
    pub errors: Vec<String>,
    /// The record, absent when not found or on failure
    pub record: Option<T>,
}

impl<T> RecordResult<T> {
    /// Build a result from its parts
    pub fn new(
        success: bool,
        message: impl Into<String>,
        record: Option<T>,
        errors: Vec<String>,
    ) -> Self {
        Self {
            success,
            message: message.into(),
            errors,
            record,
        }
    }

    /// Successful result holding `record`
    pub fn found(message: impl Into<String>, record: T) -> Self {
        Self::new(true, message, Some(record), Vec::new())
    }

    /// Failed result without a record
    pub fn missing(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::new(false, message, None, errors)
    }

    /// Drop the payload, keeping the outcome
    pub fn outcome(&self) -> OperationResult {
        OperationResult::new(self.success, self.message.clone(), self.errors.clone())
    }

    /// Map the record to a different type
    pub fn map<U, F>(self, f: F) -> RecordResult<U>
    where
        F: FnOnce(T) -> U,
    {
        RecordResult {
            success: self.success,
            message: self.message,
            errors: self.errors,
            record: self.record.map(f),
        }
    }

    /// Take the record out of the result
    pub fn into_record(self) -> Option<T> {
        self.record
    }
}

impl<T> From<RecordResult<T>> for OperationResult {
    fn from(result: RecordResult<T>) -> Self {
        OperationResult::new(result.success, result.message, result.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_uses_generic_message() {
        let result = OperationResult::fail(vec!["name: Name is required".to_string()]);
        assert!(!result.success);
        assert!(result.is_failure());
        assert_eq!(result.message, OPERATION_FAILED);
        assert_eq!(result.errors, vec!["name: Name is required"]);
    }

    #[test]
    fn test_ok_has_no_errors() {
        let result = OperationResult::ok("stored");
        assert!(result.success);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_record_result_helpers() {
        let found = RecordResult::found("Entity retrieved successfully", 7_u32);
        assert!(found.success);
        assert_eq!(found.record, Some(7));

        let doubled = found.map(|n| n * 2);
        assert_eq!(doubled.record, Some(14));

        let missing: RecordResult<u32> =
            RecordResult::missing("Invalid ID", vec!["ID cannot be empty".to_string()]);
        assert!(!missing.success);
        assert!(missing.record.is_none());

        let outcome: OperationResult = missing.clone().into();
        assert_eq!(outcome, missing.outcome());
        assert_eq!(outcome.errors, vec!["ID cannot be empty"]);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(OperationResult::fail(vec!["x".to_string()])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "Operation failed", "errors": ["x"]})
        );
    }
}
