//! HTTP layer: routes, authorization, controllers and views.

pub mod binding;
pub mod crud;
pub mod handlers;
pub mod middleware;
mod resources;
pub mod routes;
pub mod users;
pub mod views;

pub use routes::create_router;
