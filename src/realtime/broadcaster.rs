use super::events::{ServerEvent, SessionId};
use crate::models::alert::Alert;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

pub type EventSender = mpsc::UnboundedSender<ServerEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<ServerEvent>;

/// Fans events out to every connected session.
///
/// Each session owns a FIFO queue, so events pushed in order are observed in
/// order. Pushing never blocks: a session whose queue is gone is skipped.
#[derive(Clone, Default)]
pub struct Broadcaster {
    sessions: Arc<Mutex<HashMap<SessionId, EventSender>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `id` reachable by broadcasts and returns its event queue.
    /// `greeting` is queued before any broadcast can reach the session.
    pub fn register(&self, id: SessionId, greeting: Option<ServerEvent>) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Some(event) = greeting {
            deliver(id, &tx, event);
        }
        self.sessions.lock().insert(id, tx);
        rx
    }

    pub fn unregister(&self, id: SessionId) -> bool {
        self.sessions.lock().remove(&id).is_some()
    }

    #[cfg(test)]
    pub fn connection_count(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn broadcast_new(&self, alert: &Alert) {
        self.broadcast(ServerEvent::NewAlert(alert.clone()));
    }

    pub fn broadcast_infrastructure_update(&self, timestamp: DateTime<Utc>) {
        self.broadcast(ServerEvent::InfrastructureUpdate {
            timestamp,
            message: "Infrastructure data updated".to_string(),
        });
    }

    /// Sends the given active-alert snapshot to one session only.
    pub fn send_snapshot(&self, id: SessionId, alerts: Vec<Alert>) -> bool {
        self.send_to(id, ServerEvent::AlertsUpdate(alerts))
    }

    pub fn send_to(&self, id: SessionId, event: ServerEvent) -> bool {
        let target = self.sessions.lock().get(&id).cloned();
        match target {
            Some(tx) => deliver(id, &tx, event),
            None => {
                debug!(session = %id, event = event.name(), "Dropping event for unknown session");
                false
            }
        }
    }

    fn broadcast(&self, event: ServerEvent) {
        // Clone the senders out so delivery runs without the registry lock.
        let targets: Vec<(SessionId, EventSender)> = self
            .sessions
            .lock()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        for (id, tx) in targets {
            deliver(id, &tx, event.clone());
        }
    }
}

fn deliver(id: SessionId, tx: &EventSender, event: ServerEvent) -> bool {
    let name = event.name();
    match tx.send(event) {
        Ok(()) => true,
        Err(_) => {
            debug!(session = %id, event = name, "Session queue closed, event dropped");
            false
        }
    }
}
