//! services/api/src/web/appointments.rs
//!
//! CRUD and query endpoints for appointments: owner-scoped listing, the
//! calendar week view and keyword search.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::web::state::AppState;
use agendas_core::domain::{AppointmentUpdate, NewAppointment};
use agendas_core::ports::PortError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub user_id: Option<i64>,
    pub statut: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub date_naissance: Option<String>,
    pub telephone: Option<String>,
    pub titre: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub heure: Option<String>,
    pub duree: Option<i64>,
    pub location: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekQuery {
    pub start: String,
    pub end: String,
    pub user_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub q: String,
    pub user_id: Option<i64>,
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.appointments.get_all().await))
}

pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let appointment = state
        .appointments
        .get_by_id(id)
        .await
        .ok_or_else(|| PortError::NotFound("Rendez-vous non trouvé".into()))?;
    Ok(Json(appointment))
}

pub async fn list_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.appointments.get_by_user_id(user_id).await))
}

/// The calendar view: every appointment whose date falls within
/// `[start, end]`, both bounds inclusive.
pub async fn list_by_week(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeekQuery>,
) -> ApiResult<impl IntoResponse> {
    let start = parse_date(&query.start)?;
    let end = parse_date(&query.end)?;

    Ok(Json(
        state.appointments.get_by_week(start, end, query.user_id).await,
    ))
}

pub async fn search_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.appointments.search(&query.q, query.user_id).await))
}

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAppointmentRequest>,
) -> ApiResult<impl IntoResponse> {
    let (user_id, titre, description, date, heure, duree, location) = match (
        req.user_id,
        req.titre,
        req.description,
        req.date,
        req.heure,
        req.duree,
        req.location,
    ) {
        (Some(a), Some(b), Some(c), Some(d), Some(e), Some(f), Some(g)) => (a, b, c, d, e, f, g),
        _ => {
            return Err(ApiError::BadRequest(
                "Tous les champs sont obligatoires".into(),
            ))
        }
    };

    let appointment = state
        .appointments
        .save(NewAppointment {
            user_id,
            statut: req.statut,
            nom: req.nom,
            prenom: req.prenom,
            date_naissance: req.date_naissance,
            telephone: req.telephone,
            titre,
            description,
            date,
            heure,
            duree,
            location,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "appointment": appointment })),
    ))
}

pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<AppointmentUpdate>,
) -> ApiResult<impl IntoResponse> {
    let appointment = state.appointments.update(id, update).await?;
    Ok(Json(json!({ "success": true, "appointment": appointment })))
}

pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state.appointments.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Format de date invalide (attendu: YYYY-MM-DD)".into()))
}
