use crate::models::alert::Alert;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;

pub async fn list_alerts(State(state): State<AppState>) -> Json<Vec<Alert>> {
    Json(state.alerts.active_alerts())
}
