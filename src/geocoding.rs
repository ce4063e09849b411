use crate::config::AppConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub latitude: f64,
    pub longitude: f64,
    pub place_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("geocoder returned an invalid coordinate: '{0}'")]
    InvalidCoordinate(String),
}

/// Address lookups. `Ok(None)` means the provider found nothing.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Option<Place>, GeocodeError>;

    async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<String>, GeocodeError>;
}

/// OpenStreetMap Nominatim client.
pub struct NominatimGeocoder {
    base_url: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ReverseHit {
    display_name: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.geocoder_timeout_ms))
            .user_agent(&config.geocoder_user_agent)
            .build()?;

        Ok(Self {
            base_url: config.geocoder_base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Place>, GeocodeError> {
        debug!(address = %address, "Geocoding address");

        let hits: Vec<SearchHit> = self
            .http_client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };

        Ok(Some(Place {
            latitude: parse_coordinate(&hit.lat)?,
            longitude: parse_coordinate(&hit.lon)?,
            place_name: hit.display_name,
        }))
    }

    async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<String>, GeocodeError> {
        debug!(lat, lng, "Reverse geocoding");

        let hit: ReverseHit = self
            .http_client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(hit.display_name)
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse()
        .map_err(|_| GeocodeError::InvalidCoordinate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_hit_parsing() {
        let payload = r#"[{"place_id": 1, "lat": "37.7790262", "lon": "-122.419906", "display_name": "San Francisco City Hall"}]"#;
        let hits: Vec<SearchHit> = serde_json::from_str(payload).unwrap();
        assert_eq!(parse_coordinate(&hits[0].lat).unwrap(), 37.7790262);
        assert_eq!(parse_coordinate(&hits[0].lon).unwrap(), -122.419906);
    }

    #[test]
    fn test_reverse_error_payload_has_no_name() {
        let hit: ReverseHit = serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert!(hit.display_name.is_none());
    }

    #[test]
    fn test_bad_coordinate() {
        assert!(matches!(
            parse_coordinate("north"),
            Err(GeocodeError::InvalidCoordinate(raw)) if raw == "north"
        ));
    }
}
