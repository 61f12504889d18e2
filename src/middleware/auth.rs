use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Bearer-token middleware for protected routes.
///
/// On success the decoded [`Principal`](crate::auth::Principal) is inserted into
/// the request extensions; handlers read it with `Extension<Principal>`.
/// The claims are trusted as-is once the signature and expiry check out.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthenticated)?;

    let principal = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        ApiError::unauthenticated("Invalid or expired token")
    })?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    // The scheme name is case-insensitive.
    let token = match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
        _ => return Err("Authorization header must use Bearer token format"),
    };

    if token.is_empty() {
        return Err("Empty bearer token");
    }
    Ok(token)
}
