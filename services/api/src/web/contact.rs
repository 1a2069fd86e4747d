//! services/api/src/web/contact.rs
//!
//! The public contact endpoint. The message is persisted (and broadcast)
//! first; the email relay is best effort and can never undo the stored
//! message.

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::web::state::AppState;
use agendas_core::domain::NewMessage;

#[derive(Deserialize, ToSchema)]
pub struct ContactRequest {
    pub nom: Option<String>,
    pub email: Option<String>,
    pub sujet: Option<String>,
    pub message: Option<String>,
}

/// Submit a contact message.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message enregistré"),
        (status = 400, description = "Champs manquants")
    )
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactRequest>,
) -> ApiResult<impl IntoResponse> {
    let (nom, email, sujet, message) = match (req.nom, req.email, req.sujet, req.message) {
        (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
        _ => {
            return Err(ApiError::BadRequest(
                "Tous les champs sont obligatoires".into(),
            ))
        }
    };

    let stored = state
        .hub
        .send(NewMessage {
            nom,
            email,
            sujet,
            message,
        })
        .await?;

    state.mailer.attempt_notify(&stored).await;

    Ok(Json(json!({ "success": true, "messageId": stored.id })))
}
