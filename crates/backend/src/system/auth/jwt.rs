use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use contracts::system::auth::TokenClaims;
use contracts::system::users::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use crate::shared::config::AuthConfig;

/// Параметры выпуска токенов
pub struct JwtSettings {
    secret: String,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

/// Выпущенный access token и момент его истечения
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl JwtSettings {
    pub fn new(secret: impl Into<String>, access_token_minutes: i64, refresh_token_days: i64) -> Self {
        Self {
            secret: secret.into(),
            access_lifetime: Duration::minutes(access_token_minutes),
            refresh_lifetime: Duration::days(refresh_token_days),
        }
    }

    /// Настройки из конфигурации; пустой секрет заменяется случайным
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = if config.jwt_secret.trim().is_empty() {
            tracing::warn!("auth.jwt_secret is empty, using a random secret for this process");
            generate_jwt_secret()
        } else {
            config.jwt_secret.clone()
        };
        Self::new(
            secret,
            config.access_token_minutes,
            config.refresh_token_days,
        )
    }

    /// Момент истечения нового refresh token
    pub fn refresh_token_expiration(&self) -> DateTime<Utc> {
        Utc::now() + self.refresh_lifetime
    }
}

/// Generate JWT access token for the user
pub fn generate_access_token(settings: &JwtSettings, user: &User) -> Result<IssuedToken> {
    let now = Utc::now();
    let expires_at = now + settings.access_lifetime;

    let claims = TokenClaims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        exp: expires_at.timestamp().max(0) as usize,
        iat: now.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .context("Failed to encode JWT token")?;

    Ok(IssuedToken { token, expires_at })
}

/// Validate JWT token and extract claims
pub fn validate_token(settings: &JwtSettings, token: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Generate refresh token (UUID-based)
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// SHA-256 (hex) одноразового токена; в хранилище попадает только хэш
pub fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::users::UserRole;

    fn user(role: UserRole) -> User {
        User {
            id: 7,
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            role,
            permissions: role.default_permissions(),
            created_at: Utc::now(),
            is_active: true,
        }
    }

    #[test]
    fn test_token_round_trip_keeps_role() {
        let settings = JwtSettings::new("test-secret", 60, 30);
        let issued = generate_access_token(&settings, &user(UserRole::Admin)).unwrap();
        let claims = validate_token(&settings, &issued.token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "jdoe");
        assert_eq!(claims.role, UserRole::Admin);
        assert!(issued.expires_at > Utc::now());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtSettings::new("secret-a", 60, 30);
        let verifier = JwtSettings::new("secret-b", 60, 30);
        let issued = generate_access_token(&issuer, &user(UserRole::User)).unwrap();
        assert!(validate_token(&verifier, &issued.token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let settings = JwtSettings::new("test-secret", -10, 30);
        let issued = generate_access_token(&settings, &user(UserRole::User)).unwrap();
        assert!(validate_token(&settings, &issued.token).is_err());
    }

    #[test]
    fn test_empty_secret_is_replaced() {
        let config = AuthConfig {
            jwt_secret: "  ".into(),
            access_token_minutes: 60,
            refresh_token_days: 30,
        };
        let settings = JwtSettings::from_config(&config);
        assert!(!settings.secret.trim().is_empty());
        assert_ne!(generate_refresh_token(), generate_refresh_token());
    }

    #[test]
    fn test_hash_token_is_stable_hex() {
        let a = hash_token("abc");
        assert_eq!(a.len(), 64);
        assert_eq!(a, hash_token("abc"));
        assert_ne!(a, hash_token("abd"));
    }
}
