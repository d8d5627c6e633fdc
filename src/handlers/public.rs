use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::ApiError;

use super::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Portfolio API",
            "version": version,
            "description": "Portfolio content service with admin CRUD",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "portfolio": "/api/portfolio (public)",
                "contact": "/api/contact (public)",
                "login": "/api/admin/login (public - token acquisition)",
                "projects": "/api/admin/projects[/:id] (mutations require token)",
                "experience": "/api/admin/experience[/:id] (mutations require token)",
            }
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

/// GET /api/portfolio - every section keyed by name, the full public
/// portfolio document.
pub async fn portfolio(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let sections = state.store.get_all().await?;
    Ok(Json(Value::Object(sections)))
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// POST /api/contact - validate and hand off to the mail collaborator.
pub async fn contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut field_errors = HashMap::new();
    for (field, value) in [
        ("name", &payload.name),
        ("email", &payload.email),
        ("message", &payload.message),
    ] {
        if value.trim().is_empty() {
            field_errors.insert(field.to_string(), "This field is required".to_string());
        }
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error(
            "All fields are required",
            Some(field_errors),
        ));
    }

    let message = crate::mailer::ContactMessage {
        name: payload.name,
        email: payload.email,
        message: payload.message,
    };
    state.mailer.send_contact(&message).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Email sent successfully!"
    })))
}
