//! Validation rules shared by client forms and server handlers

use serde::{Deserialize, Serialize};

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    pub const fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Validate a string value against the rules (length in characters, trimmed)
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        let trimmed = value.trim();
        if self.required && trimmed.is_empty() {
            return Err(format!("{} is required", field_label));
        }

        let len = trimmed.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!(
                    "{} must be at least {} characters long",
                    field_label, min
                ));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!(
                    "{} must not exceed {} characters",
                    field_label, max
                ));
            }
        }

        Ok(())
    }

    /// Validate a numeric value against min rule
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} must be a number", field_label));
        }
        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} must be at least {}", field_label, min));
            }
        }
        Ok(())
    }
}

/// Накопитель ошибок валидации: форма показывает все ошибки сразу
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, result: Result<(), String>) {
        if let Err(e) = result {
            self.0.push(e);
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// SKU: только латиница, цифры, '-' и '_'
pub fn validate_sku(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("SKU is required".into());
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("SKU may contain only letters, digits, '-' and '_'".into());
    }
    Ok(())
}

/// URL изображения: http(s), без пробелов и кавычек
pub fn validate_image_url(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) if !rest.is_empty() && !rest.contains([' ', '"']) => Ok(()),
        _ => Err("Image URL must be a valid http(s) address".into()),
    }
}

/// Базовая проверка email (как в управлении пользователями)
pub fn validate_email(value: &str) -> Result<(), String> {
    match value.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("Invalid email format".into()),
    }
}

/// Пароль: минимум 8 символов, хотя бы одна буква и одна цифра
pub fn validate_password_strength(value: &str) -> Result<(), String> {
    if value.chars().count() < 8 {
        return Err("Password must be at least 8 characters long".into());
    }
    let has_letter = value.chars().any(|c| c.is_alphabetic());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err("Password must contain at least one letter and one digit".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_string_lengths() {
        let rules = ValidationRules::required().min_length(2).max_length(5);
        assert!(rules.validate_string("ab", "Name").is_ok());
        assert!(rules.validate_string("  ab  ", "Name").is_ok());
        assert_eq!(
            rules.validate_string("", "Name"),
            Err("Name is required".to_string())
        );
        assert!(rules.validate_string("a", "Name").is_err());
        assert!(rules.validate_string("abcdef", "Name").is_err());
    }

    #[test]
    fn test_validate_number() {
        let rules = ValidationRules::required().min(0.01);
        assert!(rules.validate_number(0.01, "Price").is_ok());
        assert!(rules.validate_number(0.0, "Price").is_err());
        assert!(rules.validate_number(f64::NAN, "Price").is_err());
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("ELEC-SMART_X1").is_ok());
        assert!(validate_sku("").is_err());
        assert!(validate_sku("ELEC SMART").is_err());
        assert!(validate_sku("ЭЛЕК-1").is_err());
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("").is_ok());
        assert!(validate_image_url("https://via.placeholder.com/150").is_ok());
        assert!(validate_image_url("http://x.io/a.png").is_ok());
        assert!(validate_image_url("ftp://x.io/a.png").is_err());
        assert!(validate_image_url("https://x.io/a b.png").is_err());
        assert!(validate_image_url("https://").is_err());
    }

    #[test]
    fn test_validate_password_strength() {
        assert!(validate_password_strength("passw0rd").is_ok());
        assert!(validate_password_strength("short1").is_err());
        assert!(validate_password_strength("onlyletters").is_err());
        assert!(validate_password_strength("12345678").is_err());
    }

    #[test]
    fn test_errors_collect_all_messages() {
        let mut errors = ValidationErrors::new();
        errors.check(Ok(()));
        errors.check(Err("first".into()));
        errors.push("second");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.messages(), &["first".to_string(), "second".to_string()]);
        assert_eq!(err.to_string(), "first; second");
    }
}
