use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::TokenClaims;

use crate::shared::error::AppError;

/// Extractor for getting current user from JWT token
/// Usage in handlers: `async fn handler(CurrentUser(claims): CurrentUser) -> Response`
pub struct CurrentUser(pub TokenClaims);

impl CurrentUser {
    /// ID пользователя из `sub`
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Malformed token subject"))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Claims are placed into extensions by the auth middleware
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::unauthorized("Not authenticated"))
    }
}
