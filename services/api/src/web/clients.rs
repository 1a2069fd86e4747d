//! services/api/src/web/clients.rs
//!
//! CRUD endpoints for the client directory.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::web::state::AppState;
use agendas_core::domain::{ClientUpdate, NewClient};
use agendas_core::ports::PortError;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub date_naissance: Option<String>,
    pub notes: Option<String>,
    pub date_creation: Option<String>,
    pub derniere_visite: Option<String>,
    pub status: Option<String>,
    pub total_rendez_vous: Option<i64>,
}

/// List all clients.
#[utoipa::path(
    get,
    path = "/api/clients",
    responses((status = 200, description = "La liste complète des clients"))
)]
pub async fn list_clients(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.clients.get_all().await))
}

pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let client = state
        .clients
        .get_by_id(id)
        .await
        .ok_or_else(|| PortError::NotFound("Client non trouvé".into()))?;
    Ok(Json(client))
}

/// Create a client. Only nom and prénom are mandatory.
#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientRequest,
    responses(
        (status = 200, description = "Client créé"),
        (status = 400, description = "Champs manquants ou email déjà utilisé")
    )
)]
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateClientRequest>,
) -> ApiResult<impl IntoResponse> {
    let (nom, prenom) = match (req.nom, req.prenom) {
        (Some(nom), Some(prenom)) => (nom, prenom),
        _ => {
            return Err(ApiError::BadRequest(
                "Les champs nom et prénom sont obligatoires".into(),
            ))
        }
    };

    let client = state
        .clients
        .save(NewClient {
            nom,
            prenom,
            email: req.email.unwrap_or_default(),
            telephone: req.telephone.unwrap_or_default(),
            adresse: req.adresse.unwrap_or_default(),
            date_naissance: req.date_naissance,
            notes: req.notes.unwrap_or_default(),
            date_creation: req.date_creation,
            derniere_visite: req.derniere_visite,
            status: req.status,
            total_rendez_vous: req.total_rendez_vous,
        })
        .await?;

    Ok(Json(json!({ "success": true, "client": client })))
}

pub async fn update_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<ClientUpdate>,
) -> ApiResult<impl IntoResponse> {
    let client = state.clients.update(id, update).await?;
    Ok(Json(json!({ "success": true, "client": client })))
}

pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state.clients.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}
