// SPDX-License-Identifier: MIT

//! Wayfarer API server.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer_api::{
    config::Config,
    db::Db,
    services::{GoogleAuthService, SessionIssuer},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment. A missing signing secret fails
    // here, not on the first login.
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Wayfarer API");

    let db = match &config.gcp_project_id {
        Some(project_id) => Db::firestore(project_id).await?,
        None => {
            tracing::warn!("GCP_PROJECT_ID not set, using in-memory store (data is not durable)");
            Db::in_memory()
        }
    };

    // Activation gate: the adapter only exists when all three OAuth
    // settings were present at startup.
    let google = config.google.clone().map(GoogleAuthService::new);
    if google.is_some() {
        tracing::info!("Google sign-in enabled");
    }

    let sessions = SessionIssuer::new(config.jwt_signing_key.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        google,
        sessions,
    });

    let app = wayfarer_api::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wayfarer_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
