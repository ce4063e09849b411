use super::broadcaster::{Broadcaster, EventReceiver};
use super::events::{ServerEvent, SessionId};
use crate::alerts::store::AlertStore;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

pub const WELCOME_MESSAGE: &str = "Connected to CityPulse real-time updates";

/// Connection lifecycle for real-time clients.
///
/// Every connected session receives broadcasts. The subscriber set only
/// records which sessions asked for alerts; it does not filter delivery.
pub struct SessionLayer {
    store: Arc<AlertStore>,
    broadcaster: Broadcaster,
    subscribers: Mutex<HashSet<SessionId>>,
}

impl SessionLayer {
    pub fn new(store: Arc<AlertStore>, broadcaster: Broadcaster) -> Self {
        Self {
            store,
            broadcaster,
            subscribers: Mutex::new(HashSet::new()),
        }
    }

    pub fn on_connect(&self, id: SessionId) -> EventReceiver {
        let welcome = ServerEvent::Connected {
            message: WELCOME_MESSAGE.to_string(),
        };
        let rx = self.broadcaster.register(id, Some(welcome));
        info!(session = %id, "Client connected");
        rx
    }

    /// Marks the session subscribed and sends it the current snapshot.
    pub fn on_subscribe(&self, id: SessionId) {
        self.subscribers.lock().insert(id);
        let count = self.store.send_snapshot(id);
        debug!(session = %id, alerts = count, "Sent alert snapshot");
    }

    pub fn on_disconnect(&self, id: SessionId) {
        self.subscribers.lock().remove(&id);
        if self.broadcaster.unregister(id) {
            info!(session = %id, "Client disconnected");
        }
    }

    #[cfg(test)]
    pub fn is_subscribed(&self, id: SessionId) -> bool {
        self.subscribers.lock().contains(&id)
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Subscribed,
    Disconnected,
}

/// One client connection. Dropping it disconnects the session.
pub struct Session {
    id: SessionId,
    state: SessionState,
    layer: Arc<SessionLayer>,
}

impl Session {
    pub fn connect(layer: Arc<SessionLayer>) -> (Self, EventReceiver) {
        let id = SessionId::new();
        let rx = layer.on_connect(id);
        let session = Self {
            id,
            state: SessionState::Connected,
            layer,
        };
        (session, rx)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    #[cfg(test)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Re-subscribing sends a fresh snapshot. No-op once disconnected.
    pub fn subscribe(&mut self) {
        if self.state == SessionState::Disconnected {
            return;
        }
        self.layer.on_subscribe(self.id);
        self.state = SessionState::Subscribed;
    }

    pub fn disconnect(&mut self) {
        if self.state != SessionState::Disconnected {
            self.layer.on_disconnect(self.id);
            self.state = SessionState::Disconnected;
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}
