// handlers/public/drawers.rs - shared drawer creation and login

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::services::DrawerSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerRequest {
    pub drawer_name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/drawers - create a drawer and return a drawer-scoped token
///
/// Input: `{ "drawerName": "...", "password": "..." }`
/// Output: `{ "token": "...", "drawer": { "id", "drawerName" } }`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<DrawerRequest>, JsonRejection>,
) -> Result<Json<DrawerSession>, ApiError> {
    let Json(req) = payload?;
    let session = state.accounts.create_drawer(req.drawer_name, req.password).await?;
    Ok(Json(session))
}

/// POST /api/drawers/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<DrawerRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(req) = payload?;
    let token = state.accounts.login_drawer(req.drawer_name, req.password).await?;
    Ok(Json(TokenResponse { token }))
}
