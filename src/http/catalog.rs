use super::error::ApiError;
use crate::db::demo;
use crate::models::catalog::{
    Bottleneck, GrowthSample, InfrastructureAsset, PlannedProject, Project, Regulations,
};
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoordinateQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AreaQuery {
    pub area_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegulationQuery {
    pub project_type: Option<String>,
}

pub async fn projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Json<Vec<Project>> {
    Json(state.db.projects(query.kind.as_deref()))
}

pub async fn infrastructure_status(State(state): State<AppState>) -> Json<Vec<InfrastructureAsset>> {
    Json(state.db.infrastructure().to_vec())
}

pub async fn bottlenecks() -> Json<Vec<Bottleneck>> {
    Json(demo::bottlenecks())
}

/// Growth metrics around a point, simulated in lieu of satellite analysis.
pub async fn urban_growth(
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let coordinates = query.ok().and_then(|Query(q)| q.lat.zip(q.lng));
    let Some((lat, lng)) = coordinates else {
        return Err(ApiError::Validation(
            "Latitude and longitude required".to_string(),
        ));
    };
    debug!(lat, lng, "Simulating urban growth metrics");

    let mut rng = rand::thread_rng();
    Ok(Json(json!({
        "built_up_area": rng.gen_range(40.0..60.0),
        "green_space": rng.gen_range(25.0..35.0),
        "population_density": rng.gen_range(3000..=5000),
        "growth_rate": rng.gen_range(2.5..5.5),
        "last_updated": Utc::now(),
    })))
}

pub async fn growth_analytics(State(state): State<AppState>) -> Json<Vec<GrowthSample>> {
    Json(state.db.growth_series().to_vec())
}

pub async fn infrastructure_health() -> Json<Value> {
    Json(json!({
        "road_condition": {"excellent": 45, "good": 35, "fair": 15, "poor": 5},
        "bridge_condition": {"excellent": 30, "good": 40, "fair": 20, "poor": 10},
        "public_transit_score": 78,
        "overall_infrastructure_grade": "B",
    }))
}

pub async fn government_projects(Query(query): Query<AreaQuery>) -> Json<Vec<PlannedProject>> {
    debug!(
        area_code = query.area_code.as_deref().unwrap_or("default"),
        "Listing planned projects"
    );
    Json(demo::planned_projects())
}

pub async fn regulations(Query(query): Query<RegulationQuery>) -> Json<Regulations> {
    debug!(project_type = ?query.project_type, "Listing regulations");
    Json(demo::regulations())
}
