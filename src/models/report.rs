use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: u64,
    pub user_id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: ReportStatus,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub image_url: Option<String>,
}

/// Body of `POST /api/reports`. Required fields are optional here so that
/// missing ones surface as a validation error naming them.
#[derive(Debug, Default, Deserialize)]
pub struct NewReport {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub priority: Option<Priority>,
    pub image_url: Option<String>,
}

/// A report body that passed validation.
#[derive(Debug, Clone)]
pub struct ValidReport {
    pub kind: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub priority: Priority,
    pub image_url: Option<String>,
}

impl NewReport {
    /// Returns the validated report, or the names of the missing fields.
    pub fn validate(self) -> Result<ValidReport, Vec<&'static str>> {
        let mut missing = Vec::new();
        if self.kind.as_deref().map_or(true, str::is_empty) {
            missing.push("type");
        }
        if self.description.as_deref().map_or(true, str::is_empty) {
            missing.push("description");
        }
        if self.latitude.is_none() {
            missing.push("latitude");
        }
        if self.longitude.is_none() {
            missing.push("longitude");
        }

        match (self.kind, self.description, self.latitude, self.longitude) {
            (Some(kind), Some(description), Some(latitude), Some(longitude))
                if missing.is_empty() =>
            {
                Ok(ValidReport {
                    kind,
                    description,
                    latitude,
                    longitude,
                    priority: classify_priority(self.priority),
                    image_url: self.image_url,
                })
            }
            _ => Err(missing),
        }
    }
}

/// Reports are classified by the priority the client asked for.
pub fn classify_priority(requested: Option<Priority>) -> Priority {
    requested.unwrap_or_default()
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ReportStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_named() {
        let body: NewReport =
            serde_json::from_str(r#"{"type": "pothole", "latitude": 37.7}"#).unwrap();
        assert_eq!(body.validate().unwrap_err(), vec!["description", "longitude"]);
    }

    #[test]
    fn test_priority_defaults_to_medium() {
        let body: NewReport = serde_json::from_str(
            r#"{"type": "pothole", "description": "Deep hole", "latitude": 37.7, "longitude": -122.4}"#,
        )
        .unwrap();
        let report = body.validate().unwrap();
        assert_eq!(report.priority, Priority::Medium);
        assert!(report.image_url.is_none());
    }

    #[test]
    fn test_unknown_priority_is_rejected() {
        let parsed = serde_json::from_str::<NewReport>(r#"{"priority": "urgent"}"#);
        assert!(parsed.is_err());
    }
}
