use super::error::ApiError;
use crate::models::user::User;
use crate::state::AppState;
use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

const BEARER: &str = "Bearer ";

/// A caller holding a valid bearer token.
pub struct AuthUser(pub User);

/// An authenticated caller with the admin role.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(BEARER))
            .ok_or(ApiError::AuthRequired)?;

        state
            .db
            .authenticate(token.trim())
            .map(AuthUser)
            .ok_or(ApiError::InvalidToken)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(AdminUser(user))
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The returned token is the full `Authorization` header value. Both the
/// success and the rejected-credentials bodies carry a `success` flag.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(LoginRequest { username, password }) =
        payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    let Some((token, user)) = state.db.login(&username, &password) else {
        let err = ApiError::InvalidCredentials;
        debug!("Rejected login for {}", username);
        let body: Value = json!({ "success": false, "error": err.to_string() });
        return Ok((err.status(), Json(body)).into_response());
    };
    info!("User {} logged in", user.username);

    Ok(Json(json!({
        "success": true,
        "token": format!("{BEARER}{token}"),
        "user": user,
    }))
    .into_response())
}
