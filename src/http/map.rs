use super::catalog::CoordinateQuery;
use super::error::ApiError;
use crate::geocoding::Place;
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    pub address: Option<String>,
}

pub async fn geocode(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<Place>, ApiError> {
    let address = query
        .address
        .filter(|address| !address.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Address parameter required".to_string()))?;

    match state.geocoder.geocode(&address).await {
        Ok(Some(place)) => Ok(Json(place)),
        Ok(None) => Err(ApiError::NotFound("Address not found".to_string())),
        Err(e) => {
            warn!("Geocoding error for '{}': {}", address, e);
            Err(ApiError::NotFound("Address not found".to_string()))
        }
    }
}

pub async fn reverse_geocode(
    State(state): State<AppState>,
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let coordinates = query.ok().and_then(|Query(q)| q.lat.zip(q.lng));
    let Some((lat, lng)) = coordinates else {
        return Err(ApiError::Validation(
            "Latitude and longitude parameters required".to_string(),
        ));
    };

    let address = match state.geocoder.reverse(lat, lng).await {
        Ok(Some(address)) => address,
        Ok(None) => "Address not available".to_string(),
        Err(e) => {
            warn!("Reverse geocoding error for ({}, {}): {}", lat, lng, e);
            "Error getting address".to_string()
        }
    };

    Ok(Json(json!({
        "address": address,
        "coordinates": [lat, lng],
    })))
}

pub async fn map_config() -> Json<Value> {
    Json(json!({
        "tile_layer": "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        "attribution": "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
        "default_center": [37.7749, -122.4194],
        "default_zoom": 12,
    }))
}
