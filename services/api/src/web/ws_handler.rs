//! services/api/src/web/ws_handler.rs
//!
//! Entry point and control loop for a WebSocket connection. Each connection
//! subscribes to the message hub and forwards every inbox snapshot to the
//! browser; the only client-originated event is an explicit request for the
//! current snapshot.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{
    stream::{SplitSink, StreamExt},
    SinkExt,
};
use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, Mutex};
use tracing::{info, warn};

use crate::web::{
    protocol::{ClientMessage, ServerMessage},
    state::AppState,
};
use agendas_core::domain::InboxSnapshot;

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    info!("New WebSocket connection established");

    // The sender is wrapped in an Arc<Mutex<>> so the broadcast-forwarding
    // task and the request/reply path can share it.
    let (sender, mut receiver) = socket.split();
    let ws_sender = Arc::new(Mutex::new(sender));

    let mut updates = app_state.hub.subscribe();

    // --- 1. Forward hub broadcasts to this socket ---
    let forward_task = {
        let ws_sender = ws_sender.clone();
        tokio::spawn(async move {
            loop {
                match updates.recv().await {
                    Ok(snapshot) => {
                        if send_snapshot(&ws_sender, snapshot).await.is_err() {
                            break;
                        }
                    }
                    // A lagged subscriber just waits for the next snapshot;
                    // every event carries the full state anyway.
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("WebSocket subscriber lagged, skipped {} updates", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    };

    // --- 2. Main Message Loop ---
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::RequestInitialData) => {
                    // Pushed only to this socket, not broadcast.
                    let snapshot = app_state.hub.snapshot().await;
                    if send_snapshot(&ws_sender, snapshot).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to deserialize client message: {}", e);
                }
            },
            Message::Close(_) => {
                info!("Client sent close message.");
                break;
            }
            _ => {}
        }
    }

    // --- 3. Cleanup ---
    forward_task.abort();
    info!("WebSocket connection closed.");
}

async fn send_snapshot(
    ws_sender: &Arc<Mutex<SplitSink<WebSocket, Message>>>,
    snapshot: InboxSnapshot,
) -> Result<(), axum::Error> {
    let msg = ServerMessage::MessagesUpdated(snapshot);
    let json = serde_json::to_string(&msg).map_err(axum::Error::new)?;
    ws_sender
        .lock()
        .await
        .send(Message::Text(json.into()))
        .await
}
