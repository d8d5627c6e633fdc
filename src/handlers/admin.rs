use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::info;

use crate::auth::{self, AdminSession};
use crate::config;
use crate::error::ApiError;
use crate::service::Collection;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// POST /api/admin/login - exchange the shared admin password for the
/// session token. Failure is a generic 401; the response never echoes
/// the submitted or expected credential.
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<Json<Value>, ApiError> {
    let secret = &config::config().admin.password;

    match auth::login(&payload.password, secret) {
        Some(token) => {
            info!("admin login succeeded");
            Ok(Json(json!({ "success": true, "token": token })))
        }
        None => Err(ApiError::unauthorized("Invalid credentials")),
    }
}

/// GET list for a collection. Public read, bare array response.
async fn list(state: &AppState, collection: Collection) -> Result<Json<Value>, ApiError> {
    let items = state.service.list(collection).await?;
    Ok(Json(Value::Array(items)))
}

/// POST create. Rejects before the store is touched if a required
/// string field is missing or blank.
async fn create(
    state: &AppState,
    collection: Collection,
    fields: Map<String, Value>,
) -> Result<Json<Value>, ApiError> {
    let mut field_errors = HashMap::new();
    for field in collection.required_fields() {
        let present = fields
            .get(*field)
            .and_then(Value::as_str)
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false);
        if !present {
            field_errors.insert((*field).to_string(), "This field is required".to_string());
        }
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error(
            "Missing required fields",
            Some(field_errors),
        ));
    }

    let items = state.service.create_item(collection, fields).await?;
    info!(collection = %collection, "created item");
    Ok(Json(json!({ "success": true, "data": items })))
}

/// PUT update by id. An unknown id is an idempotent no-op: the
/// collection comes back unchanged with a 200.
async fn update(
    state: &AppState,
    collection: Collection,
    id: &str,
    fields: Map<String, Value>,
) -> Result<Json<Value>, ApiError> {
    let items = state.service.update_item(collection, id, fields).await?;
    info!(collection = %collection, id = %id, "updated item");
    Ok(Json(json!({ "success": true, "data": items })))
}

/// DELETE by id. Same no-op semantics as update for unknown ids.
async fn delete(
    state: &AppState,
    collection: Collection,
    id: &str,
) -> Result<Json<Value>, ApiError> {
    let items = state.service.delete_item(collection, id).await?;
    info!(collection = %collection, id = %id, "deleted item");
    Ok(Json(json!({ "success": true, "data": items })))
}

// --- Projects routes ---

pub async fn projects_list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    list(&state, Collection::Projects).await
}

pub async fn projects_create(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    create(&state, Collection::Projects, fields).await
}

pub async fn projects_update(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    update(&state, Collection::Projects, &id, fields).await
}

pub async fn projects_delete(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    delete(&state, Collection::Projects, &id).await
}

// --- Experience routes ---

pub async fn experience_list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    list(&state, Collection::Experience).await
}

pub async fn experience_create(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    create(&state, Collection::Experience, fields).await
}

pub async fn experience_update(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    update(&state, Collection::Experience, &id, fields).await
}

pub async fn experience_delete(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    delete(&state, Collection::Experience, &id).await
}
