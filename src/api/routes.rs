//! Route configuration.

use crate::api::crud::resource_routes;
use crate::api::users::user_routes;
use crate::api::{handlers, middleware};
use crate::models::{BidList, CurvePoint, Rating, RuleName, Trade};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

/// Creates the application router with the authorization layer applied.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public pages
        .route("/", get(handlers::home))
        .route("/error", get(handlers::error_page))
        // Login and logout
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/app-logout", post(handlers::logout))
        // Business records
        .merge(resource_routes::<BidList>())
        .merge(resource_routes::<CurvePoint>())
        .merge(resource_routes::<Rating>())
        .merge(resource_routes::<RuleName>())
        .merge(resource_routes::<Trade>())
        // User management
        .merge(user_routes())
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state),
            middleware::authorize,
        ))
        .with_state(state)
}
