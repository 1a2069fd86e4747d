pub mod json_store;
pub mod mailer;
pub mod sms;

pub use json_store::JsonFileStore;
pub use mailer::{NoopMailer, SmtpMailer};
pub use sms::SimulatedSmsGateway;
