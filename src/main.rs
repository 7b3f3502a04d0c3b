//! Poseidon Backend Server
//!
//! Role-gated CRUD web application for trading reference data.

use poseidon_backend::api::create_router;
use poseidon_backend::config::Config;
use poseidon_backend::db::DatabasePool;
use poseidon_backend::state::{AppState, Repositories};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Create application state
    let state = match &config.database.url {
        Some(url) => {
            let db = DatabasePool::new(url, &config.database).await?;
            if config.database.run_migrations {
                db.run_migrations().await?;
            }
            AppState::with_database(db, &config.security)
        }
        None => {
            warn!("No database configured, records are kept in memory");
            AppState::from_repositories(Repositories::in_memory(), &config.security)
        }
    };

    if let Some(admin) = &config.security.bootstrap_admin {
        state.ensure_admin(admin).await?;
    }

    let host = &config.server.host;
    let port = config.server.port;
    info!("Starting Poseidon Backend on {}:{}", host, port);

    // Build the router
    let app = create_router(Arc::new(state))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
