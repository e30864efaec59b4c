use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::domain::a001_category::aggregate::CategoryId;
use contracts::domain::a002_product::aggregate::ProductId;
use contracts::shared::{ApiResponse, ValidationErrors};
use std::fmt;

/// Доменные ошибки каталога
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Product not found")]
    ProductNotFound(ProductId),

    #[error("Category not found")]
    CategoryNotFound(CategoryId),

    #[error("Cannot delete category with {count} products. Reassign products first.")]
    CategoryInUse { id: CategoryId, count: usize },

    #[error("Category {0} does not exist")]
    UnknownCategory(CategoryId),

    #[error("Category {0} is inactive")]
    InactiveCategory(CategoryId),

    #[error("Validation failed")]
    Validation(ValidationErrors),
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::ProductNotFound(_) | CatalogError::CategoryNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            CatalogError::CategoryInUse { .. } => StatusCode::BAD_REQUEST,
            CatalogError::UnknownCategory(_)
            | CatalogError::InactiveCategory(_)
            | CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        CatalogError::Validation(errors)
    }
}

/// Ошибки аутентификации и управления пользователями
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User account is disabled")]
    UserInactive,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::UserInactive
            | AuthError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidResetToken => StatusCode::BAD_REQUEST,
            AuthError::UsernameTaken => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        AuthError::Validation(errors)
    }
}

pub type AppResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Ошибка HTTP слоя: статус + сообщение (+ список ошибок валидации)
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Option<Vec<String>>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "Validation failed".into(),
            errors: Some(errors.0),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{} {}", self.status.as_u16(), self.message);
        }
        let body = Json(ApiResponse::<()>::failure(self.message, self.errors));
        (self.status, body).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let status = err.status();
        match err {
            CatalogError::Validation(errors) => Self::validation(errors),
            other => Self::new(status, other.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let status = err.status();
        match err {
            AuthError::Validation(errors) => Self::validation(errors),
            other => Self::new(status, other.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_statuses() {
        assert_eq!(
            CatalogError::ProductNotFound(ProductId(1)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::CategoryInUse {
                id: CategoryId(1),
                count: 3
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::InactiveCategory(CategoryId(4)).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_category_in_use_message() {
        let err = CatalogError::CategoryInUse {
            id: CategoryId(1),
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Cannot delete category with 3 products. Reassign products first."
        );
    }

    #[test]
    fn test_auth_error_statuses() {
        let app: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(app.status, StatusCode::UNAUTHORIZED);
        assert_eq!(app.message, "Invalid credentials");

        let app: AppError = AuthError::UsernameTaken.into();
        assert_eq!(app.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_keeps_individual_messages() {
        let mut errors = ValidationErrors::new();
        errors.push("Name is required");
        let app: AppError = CatalogError::Validation(errors).into();
        assert_eq!(app.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(app.errors, Some(vec!["Name is required".to_string()]));
    }
}
