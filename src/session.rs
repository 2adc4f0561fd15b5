use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::storage::config::Config;

/// Bearer value the Event Service accepts on `/admin/*` routes. The
/// backend contract has no login endpoint, so the client mints the token
/// itself and only the expiry metadata around it is ours.
pub const ADMIN_BEARER: &str = "school-admin";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read token file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse token: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Session has expired")]
    SessionExpired,
    #[error("Invalid username or password")]
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub role: String,
}

impl AdminUser {
    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: "admin".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub user: Option<AdminUser>,
    pub logged_in: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: AdminUser) -> Self {
        Self {
            user: Some(user),
            logged_in: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub value: String,
    pub user_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn issue(user_id: impl Into<String>, ttl_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            value: ADMIN_BEARER.to_string(),
            user_id: user_id.into(),
            issued_at: now,
            expires_at: now + chrono::Duration::hours(ttl_hours),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn save(&self, token: &SessionToken) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(token)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn load(&self) -> Result<SessionToken, AuthError> {
        let content = std::fs::read_to_string(&self.path)?;
        let token: SessionToken = serde_json::from_str(&content)?;
        Ok(token)
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

pub struct Authenticator {
    username: String,
    password: String,
    ttl_hours: i64,
    storage: TokenStorage,
}

impl Authenticator {
    pub fn new(config: &Config) -> Self {
        Self {
            username: config.admin.username.clone(),
            password: config.admin.password.clone(),
            ttl_hours: config.session.ttl_hours as i64,
            storage: TokenStorage::new(config.session.token_cache.clone()),
        }
    }

    /// Exact match against the configured admin account. A match persists
    /// a fresh token; a mismatch persists nothing.
    pub fn log_in(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username != self.username || password != self.password {
            tracing::warn!("Rejected login attempt for '{}'", username);
            return Err(AuthError::InvalidCredentials);
        }

        let token = SessionToken::issue(username, self.ttl_hours);
        self.storage.save(&token)?;
        tracing::info!("Admin '{}' logged in, session until {}", username, token.expires_at);

        Ok(Session::authenticated(AdminUser::admin(username)))
    }

    pub fn log_out(&self) -> Result<(), AuthError> {
        self.storage.clear()?;
        tracing::info!("Logged out, session token removed");
        Ok(())
    }

    /// Rebuild the session from a persisted token at startup. Expired
    /// tokens are deleted and the session stays anonymous.
    pub fn restore(&self) -> Session {
        match self.storage.load() {
            Ok(token) if token.is_valid() => Session::authenticated(AdminUser::admin(token.user_id)),
            Ok(_) => {
                tracing::info!("Persisted session token expired, discarding");
                self.storage.clear().ok();
                Session::anonymous()
            }
            Err(_) => Session::anonymous(),
        }
    }

    /// The bearer value for mutating requests. Fails without touching the
    /// network when no valid token is stored.
    pub fn bearer_token(&self) -> Result<String, AuthError> {
        if !self.storage.exists() {
            return Err(AuthError::NotLoggedIn);
        }
        let token = self.storage.load()?;
        if !token.is_valid() {
            return Err(AuthError::SessionExpired);
        }
        Ok(token.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::Config;
    use tempfile::TempDir;

    fn authenticator_in(dir: &TempDir) -> Authenticator {
        let mut config = Config::default();
        config.session.token_cache = dir.path().join("session.json");
        Authenticator::new(&config)
    }

    #[test]
    fn login_with_configured_credentials_persists_a_token() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator_in(&dir);

        let session = auth.log_in("aa", "aaa").unwrap();

        assert!(session.logged_in);
        assert_eq!(session.user.unwrap().role, "admin");
        assert!(dir.path().join("session.json").exists());
    }

    #[test]
    fn login_with_wrong_credentials_persists_nothing() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator_in(&dir);

        let result = auth.log_in("aa", "wrong");

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(!dir.path().join("session.json").exists());
    }

    #[test]
    fn logout_removes_the_token_file() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator_in(&dir);
        auth.log_in("aa", "aaa").unwrap();

        auth.log_out().unwrap();

        assert!(!dir.path().join("session.json").exists());
        assert!(matches!(auth.bearer_token(), Err(AuthError::NotLoggedIn)));
    }

    #[test]
    fn logout_without_a_token_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator_in(&dir);

        assert!(auth.log_out().is_ok());
    }

    #[test]
    fn restore_rebuilds_the_session_from_a_valid_token() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator_in(&dir);
        auth.log_in("aa", "aaa").unwrap();

        let session = auth.restore();

        assert!(session.logged_in);
        assert_eq!(session.user.unwrap().id, "aa");
    }

    #[test]
    fn restore_discards_an_expired_token() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator_in(&dir);
        let storage = TokenStorage::new(dir.path().join("session.json"));
        let mut token = SessionToken::issue("aa", 12);
        token.expires_at = Utc::now() - chrono::Duration::hours(1);
        storage.save(&token).unwrap();

        let session = auth.restore();

        assert!(!session.logged_in);
        assert!(!dir.path().join("session.json").exists());
    }

    #[test]
    fn bearer_token_requires_a_stored_session() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator_in(&dir);

        assert!(matches!(auth.bearer_token(), Err(AuthError::NotLoggedIn)));

        auth.log_in("aa", "aaa").unwrap();
        assert_eq!(auth.bearer_token().unwrap(), ADMIN_BEARER);
    }

    #[test]
    fn bearer_token_rejects_an_expired_session() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator_in(&dir);
        let storage = TokenStorage::new(dir.path().join("session.json"));
        let mut token = SessionToken::issue("aa", 12);
        token.expires_at = Utc::now() - chrono::Duration::minutes(1);
        storage.save(&token).unwrap();

        assert!(matches!(auth.bearer_token(), Err(AuthError::SessionExpired)));
    }
}
