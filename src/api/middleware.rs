//! Path-based authorization.
//!
//! Resolves the session cookie into a [`Principal`], then checks the request
//! path against [`POLICY`]. The first matching rule decides; paths no rule
//! names only need an authenticated principal.

use crate::auth::{Principal, Role, cookie_value};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Requirement attached to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, authenticated or not.
    PermitAll,
    /// Any logged-in principal.
    Authenticated,
    /// A principal holding one of the listed authorities.
    AnyAuthority(&'static [Role]),
}

/// Ordered authorization rules. A pattern ending in `/**` covers the prefix
/// and everything below it; any other pattern matches exactly.
pub const POLICY: &[(&[&str], Access)] = &[
    (
        &["/user/**", "/admin/**", "/secure/**"],
        Access::AnyAuthority(&[Role::Admin]),
    ),
    (
        &[
            "/bidList/**",
            "/rating/**",
            "/ruleName/**",
            "/trade/**",
            "/curvePoint/**",
            "/app/logout",
        ],
        Access::AnyAuthority(&[Role::Admin, Role::User]),
    ),
    (&["/", "/error", "/login", "/app-logout"], Access::PermitAll),
];

fn matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some(prefix) => {
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
        None => pattern == path,
    }
}

/// Requirement for a request path.
#[must_use]
pub fn required_access(path: &str) -> Access {
    POLICY
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| matches(p, path)))
        .map(|(_, access)| *access)
        .unwrap_or(Access::Authenticated)
}

/// Authorization middleware.
///
/// Unauthenticated requests to protected paths are redirected to the login
/// page; a principal lacking the required authority gets the 403 error page.
pub async fn authorize(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let principal = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| cookie_value(cookies, state.sessions.cookie_name()))
        .and_then(|token| state.sessions.get(token));

    let path = request.uri().path().to_string();
    let access = required_access(&path);

    match (access, &principal) {
        (Access::PermitAll, _) => {}
        (_, None) => {
            debug!("Unauthenticated request to {}", path);
            return AppError::Unauthenticated.into_response();
        }
        (Access::AnyAuthority(roles), Some(p)) if !p.has_any_authority(roles) => {
            warn!("User {} denied access to {}", p.username, path);
            return AppError::Forbidden(path).into_response();
        }
        _ => {}
    }

    if let Some(principal) = principal {
        request.extensions_mut().insert::<Principal>(principal);
    }

    next.run(request).await
}
