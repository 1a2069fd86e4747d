//! services/api/src/web/messages.rs
//!
//! Inbox endpoints for the contact messages. Every mutation goes through the
//! hub so real-time subscribers receive the updated snapshot.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::web::state::AppState;

/// List every received message, read or not.
#[utoipa::path(
    get,
    path = "/api/messages",
    responses((status = 200, description = "Tous les messages reçus"))
)]
pub async fn list_messages(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.hub.messages().await))
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let message = state.hub.mark_read(&id).await?;
    Ok(Json(message))
}

pub async fn mark_unread(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let message = state.hub.mark_unread(&id).await?;
    Ok(Json(message))
}

pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state.hub.delete(&id).await?;
    Ok(Json(json!({ "success": true, "deletedMessage": deleted })))
}
