// Copyright 2025 Cowboy AI, LLC.

//! Framework-free HTTP boundary
//!
//! Route handlers build commands from request bodies, call a service and
//! translate the result into a status code and a JSON envelope. The mapping
//! is mechanical: it only looks at `success`, `message` and `errors`.

use crate::commands::{RecordIdRequest, StoreEntityCommand};
use crate::entity::Entity;
use crate::persistence::Repository;
use crate::results::RecordResult;
use crate::schema::Schema;
use crate::services::{EntityService, StoreOutcome};
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// 200
pub const STATUS_OK: u16 = 200;
/// 201
pub const STATUS_CREATED: u16 = 201;
/// 400
pub const STATUS_BAD_REQUEST: u16 = 400;
/// 404
pub const STATUS_NOT_FOUND: u16 = 404;
/// 500
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// JSON body returned by every route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Human readable summary
    pub message: String,
    /// Error strings, omitted when empty on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Payload, omitted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    fn ok(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
            data,
        }
    }

    fn failed(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Some(errors),
            data: None,
        }
    }
}

/// Status code plus body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpReply<T> {
    /// HTTP status code
    pub status: u16,
    /// JSON body
    pub body: ApiResponse<T>,
}

impl<T> HttpReply<T> {
    fn new(status: u16, body: ApiResponse<T>) -> Self {
        Self { status, body }
    }
}

/// 201 with the stored entity, or 400 with the errors
pub fn store_response<T>(outcome: StoreOutcome<T>) -> HttpReply<T> {
    let StoreOutcome { result, record } = outcome;
    match record {
        Some(record) if result.success => {
            HttpReply::new(STATUS_CREATED, ApiResponse::ok(result.message, Some(record)))
        }
        _ => HttpReply::new(
            STATUS_BAD_REQUEST,
            ApiResponse::failed(result.message, result.errors),
        ),
    }
}

/// 200 with the record, or 404 with the failure
pub fn get_response<T>(result: RecordResult<T>) -> HttpReply<T> {
    match result.record {
        Some(record) if result.success => {
            HttpReply::new(STATUS_OK, ApiResponse::ok(result.message, Some(record)))
        }
        _ => HttpReply::new(
            STATUS_NOT_FOUND,
            ApiResponse::failed(result.message, result.errors),
        ),
    }
}

/// 404 when the record was absent, 200 when deleted, 500 otherwise
pub fn delete_response<T>(existed: bool, deleted: bool) -> HttpReply<T> {
    match (existed, deleted) {
        (false, _) => HttpReply::new(
            STATUS_NOT_FOUND,
            ApiResponse::failed("Entity not found", Vec::new()),
        ),
        (true, true) => HttpReply::new(
            STATUS_OK,
            ApiResponse::ok("Entity deleted successfully", None),
        ),
        (true, false) => HttpReply::new(
            STATUS_INTERNAL_ERROR,
            ApiResponse::failed("Failed to delete entity", Vec::new()),
        ),
    }
}

/// 500 carrying the best available error text
pub fn internal_error<T>(detail: impl Into<String>) -> HttpReply<T> {
    HttpReply::new(
        STATUS_INTERNAL_ERROR,
        ApiResponse::failed("Internal server error", vec![detail.into()]),
    )
}

/// Body of a store request before its entity is validated
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStoreBody {
    #[serde(default)]
    entity: Value,
    #[serde(default)]
    user_id: String,
}

/// Parse `{entity, userId}` into a typed command
///
/// The entity is checked against `schema` first so every field error is
/// reported at once as a 400.
pub fn parse_store_command<T: Entity>(
    body: &Value,
    schema: &Schema,
) -> Result<StoreEntityCommand<T>, HttpReply<T>> {
    let raw: RawStoreBody = serde_json::from_value(body.clone()).map_err(|err| {
        HttpReply::new(
            STATUS_BAD_REQUEST,
            ApiResponse::failed("Invalid request body", vec![err.to_string()]),
        )
    })?;

    if raw.user_id.trim().is_empty() {
        return Err(HttpReply::new(
            STATUS_BAD_REQUEST,
            ApiResponse::failed("Invalid request body", vec!["userId: Required".to_string()]),
        ));
    }

    let entity = schema.parse::<T>(&raw.entity).map_err(|errors| {
        HttpReply::new(
            STATUS_BAD_REQUEST,
            ApiResponse::failed("Validation failed", errors.messages()),
        )
    })?;

    Ok(StoreEntityCommand::new(entity, raw.user_id))
}

/// `POST /` handler body: parse, store, map
pub async fn handle_store<T, R>(
    service: &EntityService<T, R>,
    schema: &Schema,
    body: &Value,
) -> HttpReply<T>
where
    T: Entity,
    R: Repository<T>,
{
    match parse_store_command::<T>(body, schema) {
        Ok(command) => store_response(service.store_and_return(command).await),
        Err(reply) => reply,
    }
}

/// `POST /get` handler body
pub async fn handle_get<T, R>(service: &EntityService<T, R>, body: &Value) -> HttpReply<T>
where
    T: Entity,
    R: Repository<T>,
{
    match serde_json::from_value::<RecordIdRequest>(body.clone()) {
        Ok(request) => get_response(service.get_record_by_id(&request.id).await),
        Err(err) => {
            error!(error = %err, "unreadable get request");
            internal_error(err.to_string())
        }
    }
}

/// `POST /delete` handler body; checks existence before deleting
pub async fn handle_delete<T, R>(service: &EntityService<T, R>, body: &Value) -> HttpReply<T>
where
    T: Entity,
    R: Repository<T>,
{
    let request = match serde_json::from_value::<RecordIdRequest>(body.clone()) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "unreadable delete request");
            return internal_error(err.to_string());
        }
    };

    if !service.record_exists(&request.id).await {
        return delete_response(false, false);
    }
    let deleted = service.delete_record(&request.id).await;
    delete_response(true, deleted)
}

/// JSON Schema of the response envelope for entity type `T`
pub fn response_json_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(ApiResponse<T>)).unwrap_or(Value::Null)
}

/// JSON Schema of the store command for entity type `T`
pub fn command_json_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(StoreEntityCommand<T>)).unwrap_or(Value::Null)
}
