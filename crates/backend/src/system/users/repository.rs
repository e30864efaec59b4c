use std::collections::HashMap;

use chrono::{DateTime, Utc};
use contracts::system::users::User;

/// Пользователь вместе с хэшем пароля (хэш наружу не отдаётся)
#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct RefreshTokenRecord {
    user_id: i64,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct ResetTokenRecord {
    user_id: i64,
    expires_at: DateTime<Utc>,
}

/// In-memory хранилище пользователей, refresh и reset token'ов
///
/// Токены хранятся только в виде SHA-256 хэша.
#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<StoredUser>,
    refresh_tokens: HashMap<String, RefreshTokenRecord>,
    reset_tokens: HashMap<String, ResetTokenRecord>,
    next_id: i64,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            refresh_tokens: HashMap::new(),
            reset_tokens: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn next_id(&mut self) -> i64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub fn create_with_password(&mut self, user: User, password_hash: String) {
        self.next_id = self.next_id.max(user.id + 1);
        self.users.push(StoredUser {
            user,
            password_hash,
        });
    }

    pub fn get_by_id(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.user.id == id).map(|u| &u.user)
    }

    /// Поиск по логину без учёта регистра
    pub fn get_by_username(&self, username: &str) -> Option<&User> {
        self.find_stored(username).map(|u| &u.user)
    }

    /// Поиск по email без учёта регистра
    pub fn get_by_email(&self, email: &str) -> Option<&User> {
        let email = email.trim();
        self.users
            .iter()
            .find(|u| u.user.email.eq_ignore_ascii_case(email))
            .map(|u| &u.user)
    }

    pub fn get_password_hash(&self, username: &str) -> Option<&str> {
        self.find_stored(username).map(|u| u.password_hash.as_str())
    }

    /// false, если пользователя нет
    pub fn set_password_hash(&mut self, user_id: i64, password_hash: String) -> bool {
        match self.users.iter_mut().find(|u| u.user.id == user_id) {
            Some(stored) => {
                stored.password_hash = password_hash;
                true
            }
            None => false,
        }
    }

    pub fn list_all(&self) -> Vec<User> {
        self.users.iter().map(|u| u.user.clone()).collect()
    }

    pub fn count_users(&self) -> usize {
        self.users.len()
    }

    pub fn store_refresh_token(&mut self, token_hash: String, user_id: i64, expires_at: DateTime<Utc>) {
        self.refresh_tokens.insert(
            token_hash,
            RefreshTokenRecord {
                user_id,
                expires_at,
                revoked_at: None,
            },
        );
    }

    /// ID владельца действующего (не отозванного и не истёкшего) токена
    pub fn validate_refresh_token(&self, token_hash: &str, now: DateTime<Utc>) -> Option<i64> {
        self.refresh_tokens
            .get(token_hash)
            .filter(|r| r.revoked_at.is_none() && r.expires_at > now)
            .map(|r| r.user_id)
    }

    /// Отозвать токен; false, если токен неизвестен или уже отозван
    pub fn revoke_refresh_token(&mut self, token_hash: &str) -> bool {
        match self.refresh_tokens.get_mut(token_hash) {
            Some(record) if record.revoked_at.is_none() => {
                record.revoked_at = Some(Utc::now());
                true
            }
            _ => false,
        }
    }

    /// Отозвать все refresh token'ы пользователя; возвращает число отозванных
    pub fn revoke_user_refresh_tokens(&mut self, user_id: i64) -> usize {
        let now = Utc::now();
        let mut revoked = 0;
        for record in self.refresh_tokens.values_mut() {
            if record.user_id == user_id && record.revoked_at.is_none() {
                record.revoked_at = Some(now);
                revoked += 1;
            }
        }
        revoked
    }

    /// Новый reset token заменяет прежние токены пользователя
    pub fn store_reset_token(&mut self, token_hash: String, user_id: i64, expires_at: DateTime<Utc>) {
        self.reset_tokens.retain(|_, r| r.user_id != user_id);
        self.reset_tokens
            .insert(token_hash, ResetTokenRecord { user_id, expires_at });
    }

    /// Погасить reset token (одноразовый); None, если неизвестен или истёк
    pub fn take_reset_token(&mut self, token_hash: &str, now: DateTime<Utc>) -> Option<i64> {
        self.reset_tokens
            .remove(token_hash)
            .filter(|r| r.expires_at > now)
            .map(|r| r.user_id)
    }

    fn find_stored(&self, username: &str) -> Option<&StoredUser> {
        let username = username.trim();
        self.users
            .iter()
            .find(|u| u.user.username.eq_ignore_ascii_case(username))
    }
}
