use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::users::{User, UserRole};
use crate::shared::validation::{
    validate_email, validate_password_strength, ValidationErrors, ValidationRules,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            ValidationRules::required()
                .min_length(3)
                .validate_string(&self.username, "Username"),
        );
        if self.password.chars().count() < 6 {
            errors.push("Password must be at least 6 characters long");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let name_rules = ValidationRules::required().min_length(2);
        let mut errors = ValidationErrors::new();
        errors.check(name_rules.validate_string(&self.first_name, "First name"));
        errors.check(name_rules.validate_string(&self.last_name, "Last name"));
        errors.check(
            ValidationRules::required()
                .min_length(3)
                .max_length(20)
                .validate_string(&self.username, "Username"),
        );
        errors.check(validate_email(&self.email));
        errors.check(validate_password_strength(&self.password));
        errors.into_result()
    }
}

/// Форма регистрации на клиенте: сверх RegisterRequest подтверждение
/// пароля и согласие с условиями (на сервер не отправляются)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub agree_to_terms: bool,
}

impl RegisterForm {
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.to_request().validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        errors.check(check_confirmation(&self.password, &self.confirm_password));
        if !self.agree_to_terms {
            errors.push("You must agree to the terms and conditions");
        }
        errors.into_result()
    }
}

/// POST auth/forgot-password
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ForgotPasswordRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_email(&self.email));
        errors.into_result()
    }
}

/// POST auth/reset-password; token приходит из ссылки в письме
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

impl ResetPasswordRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.token.trim().is_empty() {
            errors.push("Invalid reset link. Please request a new password reset.");
        }
        errors.check(validate_password_strength(&self.password));
        errors.into_result()
    }
}

/// Форма сброса пароля на клиенте
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn to_request(&self, token: &str) -> ResetPasswordRequest {
        ResetPasswordRequest {
            token: token.to_string(),
            password: self.password.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_password_strength(&self.password));
        errors.check(check_confirmation(&self.password, &self.confirm_password));
        errors.into_result()
    }
}

fn check_confirmation(password: &str, confirm_password: &str) -> Result<(), String> {
    if confirm_password.is_empty() {
        return Err("Please confirm your password".into());
    }
    if password != confirm_password {
        return Err("Passwords do not match".into());
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    pub username: String,
    pub role: UserRole,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

/// Ошибка API на стороне клиента
///
/// `status == 0` означает ошибку без HTTP ответа (сеть, таймаут, разбор).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Ошибка без HTTP ответа
    pub fn client(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }

    pub fn with_errors(mut self, errors: Option<Vec<String>>) -> Self {
        self.errors = errors;
        self
    }

    pub fn is_client_side(&self) -> bool {
        self.status == 0
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::client("Validation failed").with_errors(Some(errors.0))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.status == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} ({})", self.message, self.status)
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            password: "secret123".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(register_request().validate().is_ok());

        let mut bad = register_request();
        bad.username = "a-very-long-username-over-20".into();
        bad.email = "not-an-email".into();
        bad.password = "password".into();
        assert_eq!(bad.validate().unwrap_err().messages().len(), 3);
    }

    fn register_form() -> RegisterForm {
        RegisterForm {
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            password: "secret123".into(),
            confirm_password: "secret123".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            agree_to_terms: true,
        }
    }

    #[test]
    fn test_register_form_requires_confirmation_and_terms() {
        let form = register_form();
        assert!(form.validate().is_ok());
        assert_eq!(form.to_request(), register_request());

        let mut mismatch = register_form();
        mismatch.confirm_password = "secret124".into();
        assert_eq!(
            mismatch.validate().unwrap_err().messages(),
            ["Passwords do not match".to_string()]
        );

        let mut no_terms = register_form();
        no_terms.agree_to_terms = false;
        assert_eq!(
            no_terms.validate().unwrap_err().messages(),
            ["You must agree to the terms and conditions".to_string()]
        );

        // ошибки формы добавляются к ошибкам самого запроса
        let mut bad = register_form();
        bad.email = "nope".into();
        bad.confirm_password.clear();
        bad.agree_to_terms = false;
        assert_eq!(bad.validate().unwrap_err().messages().len(), 3);
    }

    #[test]
    fn test_password_reset_validation() {
        assert!(ForgotPasswordRequest { email: "a@b.io".into() }.validate().is_ok());
        assert!(ForgotPasswordRequest { email: "ab.io".into() }.validate().is_err());

        let form = ResetPasswordForm {
            password: "newpass99".into(),
            confirm_password: "newpass99".into(),
        };
        assert!(form.validate().is_ok());
        assert!(form.to_request("tok").validate().is_ok());
        assert_eq!(form.to_request("  ").validate().unwrap_err().messages().len(), 1);

        let weak = ResetPasswordForm {
            password: "short".into(),
            confirm_password: "shorter".into(),
        };
        assert_eq!(weak.validate().unwrap_err().messages().len(), 2);
    }

    #[test]
    fn test_login_validation() {
        let ok = LoginRequest {
            username: "admin".into(),
            password: "password".into(),
            remember_me: false,
        };
        assert!(ok.validate().is_ok());
        let bad = LoginRequest {
            username: "ad".into(),
            password: "pw".into(),
            remember_me: false,
        };
        assert_eq!(bad.validate().unwrap_err().messages().len(), 2);
    }

    #[test]
    fn test_api_error_from_validation() {
        let mut errors = ValidationErrors::new();
        errors.push("Name is required");
        let err: ApiError = errors.into();
        assert!(err.is_client_side());
        assert_eq!(err.errors, Some(vec!["Name is required".to_string()]));
    }
}
