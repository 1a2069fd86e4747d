//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{JsonFileStore, NoopMailer, SimulatedSmsGateway, SmtpMailer},
    config::Config,
    error::ApiError,
    web::{api_router, broadcast::MessageHub, state::AppState, ApiDoc},
};
use agendas_core::{
    domain::{Appointment, Client, Message, User},
    ports::Mailer,
    repositories::{
        AppointmentRepository, ClientRepository, MessageRepository, UserRepository,
    },
};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the JSON File Stores ---
    // One file per entity under the data directory, seeded with an empty
    // array on first run.
    let users_store = Arc::new(JsonFileStore::<User>::new(config.data_dir.join("users.json")));
    let clients_store = Arc::new(JsonFileStore::<Client>::new(
        config.data_dir.join("clients.json"),
    ));
    let appointments_store = Arc::new(JsonFileStore::<Appointment>::new(
        config.data_dir.join("appointments.json"),
    ));
    let messages_store = Arc::new(JsonFileStore::<Message>::new(
        config.data_dir.join("messages.json"),
    ));
    users_store.init().await?;
    clients_store.init().await?;
    appointments_store.init().await?;
    messages_store.init().await?;
    info!("Data directory ready at {}", config.data_dir.display());

    // --- 3. Initialize the Notification Adapters ---
    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => {
            info!("SMTP relay enabled towards {}", smtp.host);
            Arc::new(SmtpMailer::new(smtp)?)
        }
        None => {
            info!("SMTP settings absent, contact messages will be stored only");
            Arc::new(NoopMailer)
        }
    };

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        users: UserRepository::new(users_store),
        clients: ClientRepository::new(clients_store),
        appointments: AppointmentRepository::new(appointments_store),
        hub: Arc::new(MessageHub::new(MessageRepository::new(messages_store))),
        mailer,
        sms: Arc::new(SimulatedSmsGateway),
    });

    // --- 5. Create the Web Router ---
    let app = Router::new()
        .merge(api_router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
