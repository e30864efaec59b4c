use contracts::system::auth::{
    ApiError, ForgotPasswordRequest, LoginRequest, LoginResponse, LogoutRequest, RefreshRequest,
    RefreshResponse, RegisterRequest, ResetPasswordForm,
};
use contracts::system::users::User;

use crate::shared::api::ApiClient;

/// POST auth/login
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    request.validate()?;
    client.post("auth/login", request).await
}

/// POST auth/register
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<User, ApiError> {
    request.validate()?;
    client.post("auth/register", request).await
}

/// POST auth/logout (revoke refresh token)
pub async fn logout(client: &ApiClient, refresh_token: Option<String>) -> Result<(), ApiError> {
    client
        .post("auth/logout", &LogoutRequest { refresh_token })
        .await
}

/// POST auth/refresh
pub async fn refresh_token(
    client: &ApiClient,
    refresh_token: String,
) -> Result<RefreshResponse, ApiError> {
    client
        .post("auth/refresh", &RefreshRequest { refresh_token })
        .await
}

/// POST auth/forgot-password
pub async fn forgot_password(
    client: &ApiClient,
    request: &ForgotPasswordRequest,
) -> Result<(), ApiError> {
    request.validate()?;
    client.post("auth/forgot-password", request).await
}

/// POST auth/reset-password; `token` из ссылки `/auth/reset-password/:token`
pub async fn reset_password(
    client: &ApiClient,
    token: &str,
    form: &ResetPasswordForm,
) -> Result<(), ApiError> {
    form.validate()?;
    let request = form.to_request(token);
    request.validate()?;
    client.post("auth/reset-password", &request).await
}

/// GET auth/me
pub async fn get_current_user(client: &ApiClient) -> Result<User, ApiError> {
    client.get("auth/me").await
}

/// GET users (admin)
pub async fn list_users(client: &ApiClient) -> Result<Vec<User>, ApiError> {
    client.get("users").await
}
