// SPDX-License-Identifier: MIT

//! Activation gate tests.
//!
//! When CLIENT_ID, CLIENT_SECRET or CALLBACK_URL is missing at startup the
//! login endpoints must stay inert: they answer with a not-configured
//! error instead of crashing, and the rest of the API keeps working.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_login_start_inert_when_unconfigured() {
    let (app, _state) = common::create_test_app_without_google();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/google")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "auth_not_configured");
}

#[tokio::test]
async fn test_login_callback_inert_when_unconfigured() {
    let (app, _state) = common::create_test_app_without_google();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/google/callback?code=abc&state=xyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_other_routes_unaffected_by_closed_gate() {
    let (app, _state) = common::create_test_app_without_google();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_start_redirects_to_google_when_configured() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/google")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response
        .headers()
        .get("location")
        .and_then(|h| h.to_str().ok())
        .expect("redirect should carry a Location header");
    assert!(location.starts_with("https://accounts.google.com/o/oauth2/v2/auth"));
    assert!(location.contains("client_id=test_client_id"));
    assert!(location.contains("state="));
}

#[tokio::test]
async fn test_callback_forwards_provider_error() {
    // Denied consent comes back as ?error=...; the flow must stop before
    // any account work and bounce the user to the frontend.
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/google/callback?error=access_denied")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = response
        .headers()
        .get("location")
        .and_then(|h| h.to_str().ok())
        .unwrap();
    assert_eq!(
        location,
        format!("{}?error=access_denied", state.config.frontend_url)
    );
}

#[tokio::test]
async fn test_callback_rejects_tampered_state() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/google/callback?code=abc&state=bm90LXNpZ25lZA")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = response
        .headers()
        .get("location")
        .and_then(|h| h.to_str().ok())
        .unwrap();
    assert_eq!(
        location,
        format!("{}?error=invalid_state", state.config.frontend_url)
    );
}
