use axum::{Extension, Json};

use crate::auth::Principal;

/// GET /api/auth/whoami - the principal decoded from the bearer token
pub async fn whoami(Extension(principal): Extension<Principal>) -> Json<Principal> {
    Json(principal)
}
