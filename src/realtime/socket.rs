use super::events::ClientEvent;
use super::session::{Session, SessionLayer};
use crate::state::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let layer = state.sessions.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, layer))
}

async fn handle_socket(socket: WebSocket, layer: Arc<SessionLayer>) {
    let (mut session, mut events) = Session::connect(layer);
    let id = session.id();
    let (mut sink, mut stream) = socket.split();

    // Drains the session queue into the socket, one frame per event.
    let mut forward = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    warn!(session = %id, "Failed to encode {} event: {}", event.name(), e);
                    continue;
                }
            };
            if let Err(e) = sink.send(Message::Text(text)).await {
                debug!(session = %id, "Socket send failed: {}", e);
                break;
            }
        }
    });

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => match ClientEvent::parse(&text) {
                    Some(ClientEvent::SubscribeAlerts) => session.subscribe(),
                    None => debug!(session = %id, "Ignoring unknown client frame"),
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(session = %id, "Socket receive failed: {}", e);
                    break;
                }
            },
            _ = &mut forward => break,
        }
    }

    session.disconnect();
    forward.abort();
}
