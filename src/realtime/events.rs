use crate::models::alert::Alert;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of one real-time connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Frames pushed to clients, encoded as `{"event": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    Connected {
        message: String,
    },
    NewAlert(Alert),
    AlertsUpdate(Vec<Alert>),
    InfrastructureUpdate {
        timestamp: DateTime<Utc>,
        message: String,
    },
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connected { .. } => "connected",
            ServerEvent::NewAlert(_) => "new_alert",
            ServerEvent::AlertsUpdate(_) => "alerts_update",
            ServerEvent::InfrastructureUpdate { .. } => "infrastructure_update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientEvent {
    SubscribeAlerts,
}

#[derive(Debug, Deserialize)]
struct ClientFrame {
    event: String,
    #[serde(default)]
    #[allow(dead_code)]
    data: Value,
}

impl ClientEvent {
    /// Parses a text frame sent by a client. Unknown events yield `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let frame: ClientFrame = serde_json::from_str(text).ok()?;
        match frame.event.as_str() {
            "subscribe_alerts" => Some(ClientEvent::SubscribeAlerts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_event_envelope() {
        let event = ServerEvent::InfrastructureUpdate {
            timestamp: Utc::now(),
            message: "Infrastructure data updated".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "infrastructure_update");
        assert_eq!(json["data"]["message"], "Infrastructure data updated");

        let json = serde_json::to_value(ServerEvent::AlertsUpdate(vec![])).unwrap();
        assert_eq!(json["event"], "alerts_update");
        assert_eq!(json["data"], serde_json::json!([]));
    }

    #[test]
    fn test_client_event_parsing() {
        assert_eq!(
            ClientEvent::parse(r#"{"event": "subscribe_alerts"}"#),
            Some(ClientEvent::SubscribeAlerts)
        );
        assert_eq!(
            ClientEvent::parse(r#"{"event": "subscribe_alerts", "data": {}}"#),
            Some(ClientEvent::SubscribeAlerts)
        );
        assert_eq!(ClientEvent::parse(r#"{"event": "ping"}"#), None);
        assert_eq!(ClientEvent::parse("not json"), None);
    }
}
