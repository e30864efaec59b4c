use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use contracts::system::auth::TokenClaims;
use contracts::system::users::UserRole;

use super::jwt;
use crate::shared::error::AppError;
use crate::state::AppState;

/// Middleware that requires valid JWT authentication
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&state, &req)?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires admin privileges
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&state, &req)?;

    if claims.role != UserRole::Admin {
        tracing::warn!("User {} denied admin route {}", claims.username, req.uri().path());
        return Err(AppError::forbidden("Admin role required"));
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

fn authenticate(state: &AppState, req: &Request) -> Result<TokenClaims, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;

    jwt::validate_token(&state.jwt, token)
        .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}
