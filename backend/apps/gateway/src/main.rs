//! Gateway Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors go through `AuthError` / `SocialError`.

mod config;

use std::sync::Arc;

use auth::{AuthAppState, HttpAuthBackend, InMemorySessionStore, auth_router};
use social::{HttpSocialGateway, SocialAppState, social_router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gateway=info,auth=info,social=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env()?;

    // Sessions live in this process only; a restart logs everybody out
    let store = Arc::new(InMemorySessionStore::new());
    let auth_config = Arc::new(config.auth);
    let auth_backend = Arc::new(HttpAuthBackend::new(&auth_config)?);
    let gateway = Arc::new(HttpSocialGateway::new(&config.services)?);

    tracing::info!(auth_url = %auth_config.auth_url, "Auth backend configured");

    let auth_state = AuthAppState::new(store, auth_backend, auth_config);
    let guard_state = auth_state.middleware_state();

    // Build router
    let app = auth_router(auth_state)
        .merge(social_router(guard_state, SocialAppState::new(gateway)))
        .layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Listening on {}", config.addr);

    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
