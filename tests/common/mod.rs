// SPDX-License-Identifier: MIT

use std::sync::Arc;
use wayfarer_api::config::Config;
use wayfarer_api::db::Db;
use wayfarer_api::routes::create_router;
use wayfarer_api::services::{GoogleAuthService, SessionIssuer};
use wayfarer_api::AppState;

/// Create a test app backed by the in-memory store, with Google sign-in
/// enabled. Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(Config::test_default())
}

/// Create a test app where the activation gate kept Google sign-in off.
#[allow(dead_code)]
pub fn create_test_app_without_google() -> (axum::Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.google = None;
    build_app(config)
}

fn build_app(config: Config) -> (axum::Router, Arc<AppState>) {
    let db = Db::in_memory();
    let google = config.google.clone().map(GoogleAuthService::new);
    let sessions = SessionIssuer::new(config.jwt_signing_key.clone());

    let state = Arc::new(AppState {
        config,
        db,
        google,
        sessions,
    });

    (create_router(state.clone()), state)
}
