//! Page handlers outside the record controllers: landing, error, login and logout.

use crate::api::views;
use crate::auth::{Principal, cookie_value};
use crate::error::{AppResult, FORBIDDEN_MESSAGE};
use crate::state::AppState;
use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Where a successful login lands.
pub const LOGIN_SUCCESS_PATH: &str = "/bidList/list";

/// Where a rejected login is sent back to.
pub const LOGIN_FAILURE_PATH: &str = "/login?error";

/// Submitted login credentials.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Query string of the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Present after a rejected login.
    pub error: Option<String>,
}

/// Public landing page.
pub async fn home() -> Html<String> {
    views::home_page()
}

/// Public error page.
pub async fn error_page() -> Html<String> {
    views::error_page(FORBIDDEN_MESSAGE)
}

/// Fallback for paths no route matches.
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, views::error_page("Page not found."))
}

/// Renders the login form.
pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    views::login_page(query.error.is_some())
}

/// Verifies credentials and opens a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let user = state.users.find_by_username(form.username.trim()).await?;

    let Some(user) = user.filter(|u| state.passwords.matches(&form.password, &u.password)) else {
        warn!("Rejected login for {}", form.username);
        return Ok(Redirect::to(LOGIN_FAILURE_PATH).into_response());
    };

    let principal = Principal::from_user(&user);
    let token = state.sessions.create(principal);
    info!("User {} logged in", user.username);

    Ok((
        [(header::SET_COOKIE, state.sessions.session_cookie(&token))],
        Redirect::to(LOGIN_SUCCESS_PATH),
    )
        .into_response())
}

/// Closes the current session, if any, and returns to the landing page.
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let token = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| cookie_value(cookies, state.sessions.cookie_name()));

    if let Some(token) = token
        && state.sessions.remove(token)
    {
        info!("Session closed");
    }

    (
        [(header::SET_COOKIE, state.sessions.expired_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}
