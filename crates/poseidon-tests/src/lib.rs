//! Integration test helpers for the Poseidon backend.
//!
//! Tests drive the full router (authorization middleware included) in-process
//! against the in-memory store, one request at a time via `oneshot`.

use argon2::Params;
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use poseidon_backend::api::create_router;
use poseidon_backend::auth::{PasswordEncoder, Role};
use poseidon_backend::config::SecurityConfig;
use poseidon_backend::db::{Entity, InMemoryRepository, Repository};
use poseidon_backend::error::AppResult;
use poseidon_backend::models::User;
use poseidon_backend::state::{AppState, Repositories};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

/// Password that satisfies the strength policy.
pub const STRONG_PASSWORD: &str = "TestTest2*";

/// Password encoder with minimal cost, so tests stay fast.
#[must_use]
pub fn fast_encoder() -> PasswordEncoder {
    let params = Params::new(1024, 1, 1, None).expect("valid argon2 params");
    PasswordEncoder::with_params(params)
}

/// Application state on the given repositories.
#[must_use]
pub fn state_with(repositories: Repositories) -> Arc<AppState> {
    state_with_security(repositories, &SecurityConfig::default())
}

/// Application state on the given repositories and session settings.
#[must_use]
pub fn state_with_security(repositories: Repositories, security: &SecurityConfig) -> Arc<AppState> {
    Arc::new(
        AppState::from_repositories(repositories, security).with_password_encoder(fast_encoder()),
    )
}

/// Application state on fresh in-memory repositories.
#[must_use]
pub fn test_state() -> Arc<AppState> {
    state_with(Repositories::in_memory())
}

/// Router over the given state.
#[must_use]
pub fn app(state: &Arc<AppState>) -> Router {
    create_router(Arc::clone(state))
}

/// Stores a user with a hashed password.
pub async fn seed_user(state: &AppState, username: &str, role: Role) -> User {
    let user = User {
        id: None,
        username: username.to_string(),
        password: state.passwords.encode(STRONG_PASSWORD).expect("hash"),
        fullname: format!("{} full name", username),
        role,
    };
    state.users.save(user).await.expect("seed user")
}

/// Sends one request through the router.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("infallible")
}

/// GET request, optionally carrying a session cookie.
#[must_use]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

/// Form-encoded POST request, optionally carrying a session cookie.
#[must_use]
pub fn post_form(uri: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> Request<Body> {
    let body = serde_urlencoded::to_string(fields).expect("form encoding");
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).expect("request")
}

/// Logs in and returns the `name=token` pair to send back as a cookie.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = send(
        app,
        post_form("/login", &[("username", username), ("password", password)], None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/bidList/list"));

    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_string()
}

/// Seeds a user with the given role and logs them in.
pub async fn login_as(state: &Arc<AppState>, app: &Router, username: &str, role: Role) -> String {
    seed_user(state, username, role).await;
    login(app, username, STRONG_PASSWORD).await
}

/// `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Reads the whole body as UTF-8.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Repository double that counts calls before delegating to the in-memory store.
pub struct CountingRepository<T> {
    inner: InMemoryRepository<T>,
    saves: AtomicUsize,
    deletes: AtomicUsize,
}

impl<T: Entity> CountingRepository<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: InMemoryRepository::new(),
            saves: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of `delete_by_id` calls so far.
    #[must_use]
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

impl<T: Entity> Default for CountingRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for CountingRepository<T> {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<T>> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        self.inner.find_all().await
    }

    async fn save(&self, entity: T) -> AppResult<T> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(entity).await
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_by_id(id).await
    }
}
