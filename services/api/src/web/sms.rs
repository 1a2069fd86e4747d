//! services/api/src/web/sms.rs
//!
//! The reminder-SMS endpoint. Delivery is simulated by the gateway adapter;
//! the route only validates input and reports the synthetic receipt.

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::web::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsRequest {
    pub phone_number: Option<String>,
    pub message: Option<String>,
    pub appointment_id: Option<i64>,
}

pub async fn send_sms(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendSmsRequest>,
) -> ApiResult<impl IntoResponse> {
    let (phone_number, message) = match (req.phone_number, req.message) {
        (Some(phone), Some(message)) => (phone, message),
        _ => {
            return Err(ApiError::BadRequest(
                "Numéro de téléphone et message requis".into(),
            ))
        }
    };

    let receipt = state.sms.send_sms(&phone_number, &message).await?;

    if let Some(appointment_id) = req.appointment_id {
        info!("SMS de rappel envoyé pour le rendez-vous {}", appointment_id);
    }

    Ok(Json(json!({
        "success": true,
        "message": "SMS envoyé avec succès",
        "messageId": receipt.message_id,
        "timestamp": receipt.timestamp,
    })))
}
