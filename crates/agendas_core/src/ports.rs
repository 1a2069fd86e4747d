//! crates/agendas_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! repositories to be independent of the concrete storage and notification
//! backends (JSON files, SMTP, SMS).

use async_trait::async_trait;

use crate::domain::Message;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port and repository operations.
///
/// The display messages double as the user-visible error strings, which the
/// service has always produced in French.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// A validation rule was violated (duplicate email, no-op password change).
    #[error("{0}")]
    Conflict(String),
    /// The backing file could not be written.
    #[error("Erreur de stockage: {0}")]
    Storage(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Whole-collection persistence for one entity type.
///
/// There is no partial update at this layer: every mutation loads the full
/// collection, modifies it in memory and writes it back in one piece.
#[async_trait]
pub trait RecordStore<T>: Send + Sync {
    /// Loads the full collection. A missing, unreadable or unparseable
    /// backing file yields an empty collection, never an error; the caller
    /// always receives something usable.
    async fn load_all(&self) -> Vec<T>;

    /// Overwrites the full collection. On failure the previous contents are
    /// left untouched and the error is reported to the caller.
    async fn persist_all(&self, records: &[T]) -> PortResult<()>;
}

/// Best-effort outbound mail relay for contact submissions.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Attempts to relay the message. Fire and forget: failures are logged
    /// by the implementation and never surface to the caller, so a delivery
    /// problem can never roll back the already persisted message.
    async fn attempt_notify(&self, message: &Message);
}

/// Receipt returned by the SMS gateway after a (possibly simulated) send.
#[derive(Debug, Clone)]
pub struct SmsReceipt {
    pub message_id: String,
    pub timestamp: String,
}

/// Outbound SMS delivery for appointment reminders.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send_sms(&self, phone_number: &str, body: &str) -> PortResult<SmsReceipt>;
}
