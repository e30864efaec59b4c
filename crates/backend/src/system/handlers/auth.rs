use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use chrono::Utc;
use contracts::shared::ApiResponse;
use contracts::system::auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, LogoutRequest, RefreshRequest,
    RefreshResponse, RegisterRequest, ResetPasswordRequest,
};
use contracts::system::users::{User, UserRole};

use crate::shared::error::{AppResult, AuthError};
use crate::state::AppState;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::jwt::{self, hash_token};
use crate::system::auth::password;
use crate::system::users::service as user_service;

/// POST /api/auth/login
///
/// Пароль проверяется под read-блокировкой, write берётся только для refresh token.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<LoginResponse> {
    let Json(request) = payload?;
    request.validate()?;

    let user = {
        let users = state.users.read().await;
        user_service::verify_credentials(&users, &request.username, &request.password)
            .map_err(|e| {
                tracing::warn!("Failed login for {}: {}", request.username, e);
                e
            })?
    };

    let access = jwt::generate_access_token(&state.jwt, &user)?;
    let refresh_token = jwt::generate_refresh_token();
    state.users.write().await.store_refresh_token(
        hash_token(&refresh_token),
        user.id,
        state.jwt.refresh_token_expiration(),
    );

    tracing::info!("User {} logged in", user.username);
    let response = LoginResponse {
        token: access.token,
        refresh_token,
        expires_at: access.expires_at,
        user,
    };
    Ok(Json(ApiResponse::ok("Login successful", response)))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<User> {
    let Json(request) = payload?;
    let mut users = state.users.write().await;
    let user = user_service::create(&mut users, request, UserRole::User)?;
    Ok(Json(ApiResponse::ok("Registration successful", user)))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<RefreshResponse> {
    let Json(request) = payload?;
    let users = state.users.read().await;
    let user_id = users
        .validate_refresh_token(&hash_token(&request.refresh_token), Utc::now())
        .ok_or(AuthError::InvalidRefreshToken)?;

    let user = user_service::get_by_id(&users, user_id)
        .map_err(|_| AuthError::InvalidRefreshToken)?;
    if !user.is_active {
        return Err(AuthError::UserInactive.into());
    }

    let access = jwt::generate_access_token(&state.jwt, &user)?;
    Ok(Json(ApiResponse::ok(
        "Token refreshed",
        RefreshResponse {
            token: access.token,
        },
    )))
}

/// POST /api/auth/logout
///
/// Всегда успешен; переданный refresh token отзывается.
pub async fn logout(
    State(state): State<AppState>,
    payload: Result<Json<LogoutRequest>, JsonRejection>,
) -> AppResult<()> {
    let Json(request) = payload?;
    if let Some(token) = request.refresh_token.as_deref() {
        let revoked = state
            .users
            .write()
            .await
            .revoke_refresh_token(&hash_token(token));
        tracing::info!("Logout, refresh token revoked: {}", revoked);
    }
    Ok(Json(ApiResponse::ok("Logged out", ())))
}

/// POST /api/auth/forgot-password
///
/// Ответ не зависит от того, есть ли такой email. Писем mock-сервер не шлёт:
/// ссылка сброса пишется в лог.
pub async fn forgot_password(
    State(state): State<AppState>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> AppResult<()> {
    let Json(request) = payload?;
    let token = {
        let mut users = state.users.write().await;
        user_service::request_password_reset(&mut users, &request)?
    };
    match token {
        Some(token) => tracing::info!(
            "Password reset requested for {}, link: /auth/reset-password/{}",
            request.email.trim(),
            token
        ),
        None => tracing::info!("Password reset requested for unknown email {}", request.email.trim()),
    }
    Ok(Json(ApiResponse::ok(
        format!("Reset instructions have been sent to {}", request.email.trim()),
        (),
    )))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> AppResult<()> {
    let Json(request) = payload?;
    request.validate().map_err(AuthError::from)?;
    let password_hash = password::hash_password(&request.password).map_err(AuthError::from)?;

    let mut users = state.users.write().await;
    user_service::reset_password(&mut users, &request.token, password_hash)?;
    Ok(Json(ApiResponse::ok("Password has been reset", ())))
}

/// GET /api/auth/me
pub async fn current_user(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<User> {
    let user_id = current.user_id()?;
    let users = state.users.read().await;
    let user = user_service::get_by_id(&users, user_id)?;
    Ok(Json(ApiResponse::ok("Current user", user)))
}

/// GET /api/users (admin)
pub async fn list_users(State(state): State<AppState>) -> AppResult<Vec<User>> {
    let users = state.users.read().await;
    Ok(Json(ApiResponse::ok("Users", user_service::list_all(&users))))
}
