// SPDX-License-Identifier: MIT

//! Google OAuth authentication routes.
//!
//! The login endpoints are always mounted; when sign-in is not configured
//! they answer with a not-configured error instead of crashing.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AppError, Result};
use crate::middleware::auth::SESSION_COOKIE;
use crate::services::GoogleAuthService;
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/google", get(auth_start))
        .route("/auth/google/callback", get(auth_callback))
        .route("/auth/logout", get(logout))
}

/// Query parameters for starting the login flow.
#[derive(Deserialize)]
pub struct AuthStartParams {
    /// Frontend URL to redirect back to after login completes.
    /// If not provided, uses the configured frontend URL.
    #[serde(default)]
    redirect_uri: Option<String>,
}

fn google_or_unconfigured(state: &AppState) -> Result<&GoogleAuthService> {
    state.google.as_ref().ok_or(AppError::AuthNotConfigured)
}

/// Start the login flow: redirect to Google's consent screen.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuthStartParams>,
) -> Result<Redirect> {
    let google = google_or_unconfigured(&state)?;

    let frontend_url = params
        .redirect_uri
        .unwrap_or_else(|| state.config.frontend_url.clone());

    let oauth_state = sign_state(&frontend_url, &state.config.jwt_signing_key)?;
    let auth_url = google.authorize_url(&oauth_state);

    tracing::info!(frontend_url = %frontend_url, "Starting OAuth flow, redirecting to Google");

    Ok(Redirect::temporary(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback: complete the exchange, resolve the account, mint the
/// session token and hand it to the frontend.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    let google = google_or_unconfigured(&state)?;

    // Consent denied or another provider-side failure: surface it as a
    // failed login, nothing is looked up or created.
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
        let redirect = format!("{}?error={}", state.config.frontend_url, error);
        return Ok((jar, Redirect::temporary(&redirect)));
    }

    // A missing or tampered state parameter is an exchange failure.
    let frontend_url = params
        .state
        .as_deref()
        .and_then(|s| verify_state(s, &state.config.jwt_signing_key));
    let Some(frontend_url) = frontend_url else {
        tracing::warn!("Invalid or tampered OAuth state parameter");
        let redirect = format!("{}?error=invalid_state", state.config.frontend_url);
        return Ok((jar, Redirect::temporary(&redirect)));
    };

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("missing authorization code".to_string()))?;

    let session = google
        .handle_callback(&state.db, &state.sessions, &code)
        .await?;

    tracing::info!(
        account_id = %session.account.id,
        name = %session.account.name,
        "OAuth successful, session created"
    );

    let cookie = Cookie::build((SESSION_COOKIE, session.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    let redirect_url = format!("{}/auth/callback?token={}", frontend_url, session.token);

    Ok((jar.add(cookie), Redirect::temporary(&redirect_url)))
}

/// Logout: drop the session cookie. Tokens themselves are never revoked;
/// they only expire.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::from(SESSION_COOKIE));
    (jar, Redirect::temporary(&state.config.frontend_url))
}

/// Sign the post-login redirect target into the OAuth state parameter.
///
/// Format before encoding: `frontend_url|timestamp_hex|signature_hex`.
fn sign_state(frontend_url: &str, secret: &[u8]) -> Result<String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    let payload = format!("{}|{:x}", frontend_url, timestamp);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    let signed = format!("{}|{}", payload, hex::encode(signature));
    Ok(URL_SAFE_NO_PAD.encode(signed.as_bytes()))
}

/// Verify the HMAC signature and decode the frontend URL from the OAuth
/// state parameter.
fn verify_state(state: &str, secret: &[u8]) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    let parts: Vec<&str> = state_str.splitn(3, '|').collect();
    if parts.len() != 3 {
        return None;
    }

    let frontend_url = parts[0];
    let timestamp_hex = parts[1];
    let signature_hex = parts[2];

    let payload = format!("{}|{}", frontend_url, timestamp_hex);

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload.as_bytes());
    let expected_signature = hex::encode(mac.finalize().into_bytes());

    if signature_hex != expected_signature {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return None;
    }

    Some(frontend_url.to_string())
}
