// handlers/public/accounts.rs - user registration and login

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::services::UserSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/register - create a user account and start a session
///
/// Input: `{ "email": "...", "password": "...", "username": "..." }` (username optional)
/// Output: `{ "token": "...", "user": { "id", "email", "username" } }`
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<UserSession>, ApiError> {
    let Json(req) = payload?;
    let session = state
        .accounts
        .register_user(req.email, req.password, req.username)
        .await?;
    Ok(Json(session))
}

/// POST /api/login - exchange email and password for a token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<UserSession>, ApiError> {
    let Json(req) = payload?;
    let session = state.accounts.login_user(req.email, req.password).await?;
    Ok(Json(session))
}
