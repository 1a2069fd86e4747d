//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use agendas_core::ports::{Mailer, SmsGateway};
use agendas_core::repositories::{AppointmentRepository, ClientRepository, UserRepository};

use crate::config::Config;
use crate::web::broadcast::MessageHub;

/// The shared application state, created once at startup and passed to all
/// handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: UserRepository,
    pub clients: ClientRepository,
    pub appointments: AppointmentRepository,
    /// All message mutations go through the hub so subscribers stay in sync.
    pub hub: Arc<MessageHub>,
    pub mailer: Arc<dyn Mailer>,
    pub sms: Arc<dyn SmsGateway>,
}
