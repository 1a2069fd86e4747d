//! services/api/src/adapters/sms.rs
//!
//! A simulated SMS gateway. There is no carrier integration: the outbound
//! message is logged and a synthetic receipt is fabricated, which is enough
//! for the reminder flow the frontend drives.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tracing::info;

use agendas_core::ports::{PortResult, SmsGateway, SmsReceipt};

pub struct SimulatedSmsGateway;

#[async_trait]
impl SmsGateway for SimulatedSmsGateway {
    async fn send_sms(&self, phone_number: &str, body: &str) -> PortResult<SmsReceipt> {
        let now = Utc::now();
        let receipt = SmsReceipt {
            message_id: format!("msg_{}", now.timestamp_millis()),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        info!("SMS envoyé à {}: {}", phone_number, body);
        info!("Receipt {} at {}", receipt.message_id, receipt.timestamp);

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_send_returns_synthetic_receipt() {
        let gateway = SimulatedSmsGateway;
        let receipt = gateway
            .send_sms("0601020304", "Rappel: rendez-vous demain à 14h30")
            .await
            .unwrap();

        assert!(receipt.message_id.starts_with("msg_"));
        assert!(receipt.timestamp.ends_with('Z'));
    }
}
