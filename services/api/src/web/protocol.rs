//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser client and the
//! API server for the real-time message inbox. The event names are part of
//! the historical wire format and must not change.

use serde::{Deserialize, Serialize};

use agendas_core::domain::InboxSnapshot;

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Asks the server to push the current inbox snapshot to this socket
    /// only. Typically sent once right after connecting.
    RequestInitialData,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// The full inbox state. Broadcast to everyone after each message
    /// mutation, or sent individually in reply to `request-initial-data`.
    MessagesUpdated(InboxSnapshot),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_event_uses_historical_wire_names() {
        let msg = ServerMessage::MessagesUpdated(InboxSnapshot {
            messages: Vec::new(),
            unread_count: 0,
        });
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            json,
            r#"{"type":"messages-updated","messages":[],"unreadCount":0}"#
        );
    }

    #[test]
    fn client_event_parses_request_initial_data() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"request-initial-data"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::RequestInitialData));
    }
}
