use crate::realtime::socket;
use crate::state::AppState;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, post, put};
use axum::Router;
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod alerts;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod map;
pub mod reports;

pub fn router(state: AppState, frontend_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([CONTENT_TYPE, ACCEPT, AUTHORIZATION]);

    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/alerts", get(alerts::list_alerts))
        .route(
            "/api/reports",
            get(reports::list_reports).post(reports::create_report),
        )
        .route("/api/reports/:id/status", put(reports::update_report_status))
        .route("/api/urban-growth", get(catalog::urban_growth))
        .route("/api/infrastructure-projects", get(catalog::projects))
        .route("/api/infrastructure-status", get(catalog::infrastructure_status))
        .route("/api/bottlenecks", get(catalog::bottlenecks))
        .route("/api/analytics/urban-growth", get(catalog::growth_analytics))
        .route(
            "/api/analytics/infrastructure-health",
            get(catalog::infrastructure_health),
        )
        .route("/api/government/projects", get(catalog::government_projects))
        .route("/api/government/regulations", get(catalog::regulations))
        .route("/api/map/geocode", get(map::geocode))
        .route("/api/map/reverse-geocode", get(map::reverse_geocode))
        .route("/api/map/config", get(map::map_config))
        .route("/ws", get(socket::ws_handler))
        .fallback_service(ServeDir::new(frontend_dir))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
