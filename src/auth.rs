//! Authentication: roles, principals, password hashing and login sessions.

use crate::error::{AppError, AppResult};
use crate::models::User;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dashmap::DashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// Default name of the session cookie.
pub const DEFAULT_SESSION_COOKIE: &str = "SESSION";

/// Default idle time after which a session expires.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Authority granted to a user. Every user holds exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Full access, including user management.
    Admin,
    /// Access to the business entities only.
    #[default]
    User,
}

impl Role {
    /// Authority label as stored and displayed.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role string that names neither authority.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The authenticated identity presented to the authorization policy.
///
/// Built from a stored [`User`]; carries a single authority derived from the
/// user's role. Accounts have no lifecycle beyond existence, so the status
/// flags are always true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Identifier of the backing user record.
    pub user_id: Option<i32>,
    /// Login name.
    pub username: String,
    /// Stored password hash.
    pub password_hash: String,
    /// The single granted authority.
    pub role: Role,
}

impl Principal {
    /// Wraps a stored user.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            password_hash: user.password.clone(),
            role: user.role,
        }
    }

    /// Granted authorities (always exactly one).
    #[must_use]
    pub fn authorities(&self) -> [Role; 1] {
        [self.role]
    }

    /// Returns true if the principal holds any of the given authorities.
    #[must_use]
    pub fn has_any_authority(&self, roles: &[Role]) -> bool {
        self.authorities().iter().any(|r| roles.contains(r))
    }

    /// Whether the account may log in. Always true.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        true
    }

    /// Whether the account is still valid. Always true.
    #[must_use]
    pub fn is_account_non_expired(&self) -> bool {
        true
    }

    /// Whether the account is unlocked. Always true.
    #[must_use]
    pub fn is_account_non_locked(&self) -> bool {
        true
    }

    /// Whether the stored password is still valid. Always true.
    #[must_use]
    pub fn is_credentials_non_expired(&self) -> bool {
        true
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}

/// One-way adaptive password hashing (Argon2id).
#[derive(Debug, Clone, Default)]
pub struct PasswordEncoder {
    params: Params,
}

impl PasswordEncoder {
    /// Creates an encoder with the default Argon2 cost parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with explicit cost parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a raw password with a fresh random salt.
    ///
    /// # Errors
    /// Returns an error if the hash cannot be computed.
    pub fn encode(&self, raw: &str) -> AppResult<String> {
        let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())?;
        let hash = self.argon2().hash_password(raw.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verifies a raw password against a stored hash.
    ///
    /// The cost parameters embedded in the stored hash are used, so hashes
    /// produced under older parameters keep verifying.
    #[must_use]
    pub fn matches(&self, raw: &str, encoded: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(encoded) else {
            return false;
        };
        self.argon2().verify_password(raw.as_bytes(), &parsed).is_ok()
    }
}

#[derive(Debug, Clone)]
struct Session {
    principal: Principal,
    last_seen: Instant,
}

/// Login sessions keyed by an opaque token carried in a cookie.
///
/// A session expires once it has been idle for longer than the store's
/// timeout. Expired sessions are dropped when looked up and swept whenever a
/// new session is opened.
#[derive(Debug)]
pub struct SessionStore {
    cookie_name: String,
    idle_timeout: Duration,
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    /// Creates an empty store using the given cookie name and the default timeout.
    #[must_use]
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            idle_timeout: DEFAULT_SESSION_TIMEOUT,
            sessions: DashMap::new(),
        }
    }

    /// Sets the idle timeout.
    #[must_use]
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Idle time after which a session expires.
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    fn is_expired(&self, session: &Session, now: Instant) -> bool {
        now.duration_since(session.last_seen) >= self.idle_timeout
    }

    /// Name of the session cookie.
    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Opens a session for the principal and returns its token.
    pub fn create(&self, principal: Principal) -> String {
        self.purge_expired();
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                principal,
                last_seen: Instant::now(),
            },
        );
        token
    }

    /// Looks up the principal bound to a live token and marks the session as used.
    pub fn get(&self, token: &str) -> Option<Principal> {
        let now = Instant::now();
        let mut session = self.sessions.get_mut(token)?;
        if !self.is_expired(&session, now) {
            session.last_seen = now;
            return Some(session.principal.clone());
        }
        drop(session);

        self.sessions
            .remove_if(token, |_, session| self.is_expired(session, now));
        debug!("Session expired");
        None
    }

    /// Drops every expired session. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !self.is_expired(session, now));
        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }
        purged
    }

    /// Invalidates a session. Returns false if it did not exist.
    pub fn remove(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Number of stored sessions, including expired ones not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if no session is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// `Set-Cookie` value that binds the browser to a session.
    #[must_use]
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name, token
        )
    }

    /// `Set-Cookie` value that clears the session cookie.
    #[must_use]
    pub fn expired_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        )
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

/// Extracts a cookie value from a raw `Cookie` header.
#[must_use]
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
