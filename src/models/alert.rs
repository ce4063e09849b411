use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifetime of every alert, counted from its creation.
pub fn alert_ttl() -> Duration {
    Duration::hours(6)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertKind {
    Traffic,
    PowerOutage,
    WaterMain,
    RoadClosure,
    /// Raised from a citizen report; carries the report's type verbatim.
    Report(String),
}

impl AlertKind {
    /// Kinds the background generator draws from.
    pub const SIMULATED: [AlertKind; 4] = [
        AlertKind::Traffic,
        AlertKind::PowerOutage,
        AlertKind::WaterMain,
        AlertKind::RoadClosure,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            AlertKind::Traffic => "traffic",
            AlertKind::PowerOutage => "power_outage",
            AlertKind::WaterMain => "water_main",
            AlertKind::RoadClosure => "road_closure",
            AlertKind::Report(kind) => kind,
        }
    }
}

impl From<&str> for AlertKind {
    fn from(s: &str) -> Self {
        match s {
            "traffic" => AlertKind::Traffic,
            "power_outage" => AlertKind::PowerOutage,
            "water_main" => AlertKind::WaterMain,
            "road_closure" => AlertKind::RoadClosure,
            other => AlertKind::Report(other.to_string()),
        }
    }
}

impl Serialize for AlertKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AlertKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(AlertKind::from(s.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub area: String,
    pub description: String,
    pub coordinates: Option<Coordinates>,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Alert {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
