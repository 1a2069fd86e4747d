//! services/api/src/web/mod.rs
//!
//! Route handlers, shared state and the router assembly, plus the master
//! definition for the OpenAPI specification.

pub mod appointments;
pub mod broadcast;
pub mod clients;
pub mod contact;
pub mod messages;
pub mod middleware;
pub mod protocol;
pub mod sms;
pub mod state;
pub mod users;
pub mod ws_handler;

use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::web::middleware::require_auth;
use crate::web::state::AppState;

// Re-export the main WebSocket handler to make it easily accessible
// to the binary that will build the web server.
pub use ws_handler::ws_handler;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        users::register,
        users::login,
        clients::list_clients,
        clients::create_client,
        messages::list_messages,
        contact::submit_contact,
    ),
    components(schemas(
        users::RegisterRequest,
        users::LoginRequest,
        clients::CreateClientRequest,
        contact::ContactRequest,
    )),
    tags(
        (name = "Riziky Agendas API", description = "API de gestion des rendez-vous, clients et messages.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router Assembly
//=========================================================================================

/// Builds the full application router, WebSocket endpoint included.
pub fn api_router(state: Arc<AppState>) -> Router {
    let users_public = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/reset-password", post(users::reset_password))
        .route("/check-email/{email}", get(users::check_email));

    let users_protected = Router::new()
        .route(
            "/profile",
            get(users::get_profile)
                .put(users::update_profile)
                .delete(users::delete_profile),
        )
        .route("/verify-password", post(users::verify_password))
        .route("/change-password", put(users::change_password))
        .route(
            "/notification-settings",
            get(users::get_notification_settings).put(users::update_notification_settings),
        )
        .route(
            "/privacy-settings",
            get(users::get_privacy_settings).put(users::update_privacy_settings),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let clients_routes = Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route(
            "/{id}",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        );

    let appointments_routes = Router::new()
        .route(
            "/",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route("/week", get(appointments::list_by_week))
        .route("/search", get(appointments::search_appointments))
        .route("/user/{userId}", get(appointments::list_by_user))
        .route(
            "/{id}",
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        );

    let messages_routes = Router::new()
        .route("/", get(messages::list_messages))
        .route("/{id}/mark-read", put(messages::mark_read))
        .route("/{id}/mark-unread", put(messages::mark_unread))
        .route("/{id}", delete(messages::delete_message));

    let sms_routes = Router::new()
        .route("/send-sms", post(sms::send_sms))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/", get(welcome))
        .route("/ws", get(ws_handler))
        .nest("/api/users", users_public.merge(users_protected))
        .nest("/api/clients", clients_routes)
        .nest("/api/appointments", appointments_routes)
        .nest("/api/messages", messages_routes)
        .nest("/api/contact", Router::new().route("/", post(contact::submit_contact)))
        .nest("/api/sms", sms_routes)
        .fallback(not_found)
        .with_state(state)
}

/// Base route confirming the server is up.
async fn welcome() -> impl IntoResponse {
    Json(json!({ "message": "Bienvenue sur l'API de Riziky-Agendas" }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route non trouvée" })),
    )
}
