use super::auth::{AdminUser, AuthUser};
use super::error::ApiError;
use crate::models::alert::{AlertKind, Coordinates, Severity};
use crate::models::report::{NewReport, Priority, Report, StatusUpdate};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

pub const HIGH_PRIORITY_AREA: &str = "Multiple districts";

pub async fn list_reports(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Json<Vec<Report>> {
    Json(state.db.reports_for(&user))
}

pub async fn create_report(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<NewReport>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let valid = body.validate().map_err(|missing| {
        ApiError::Validation(format!("Missing required fields: {}", missing.join(", ")))
    })?;

    let (report, credits) = state.db.create_report(&user, valid);
    info!(
        "User {} submitted report {} ({}, {:?})",
        user.username, report.id, report.kind, report.priority
    );

    if report.priority == Priority::High {
        state.alerts.add(
            AlertKind::from(report.kind.as_str()),
            Severity::High,
            HIGH_PRIORITY_AREA,
            format!("New high-priority issue: {}", report.description),
            Some(Coordinates {
                lat: report.latitude,
                lng: report.longitude,
            }),
        );
    }

    Ok(Json(json!({
        "success": true,
        "report": report,
        "credits": credits,
    })))
}

pub async fn update_report_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<u64>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<Report>, ApiError> {
    let Json(update) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    let report = state
        .db
        .update_report_status(id, update.status)
        .ok_or_else(|| ApiError::NotFound(format!("Report {id} not found")))?;
    info!(
        "Admin {} set report {} to {:?}",
        admin.username, report.id, report.status
    );

    Ok(Json(report))
}
