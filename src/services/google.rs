// SPDX-License-Identifier: MIT

//! Google OAuth strategy: authorization-code exchange, userinfo fetch,
//! and the login flow that turns a callback into an account and a
//! session token.
//!
//! Constructed only when all three OAuth settings are present; callers
//! hold an `Option<GoogleAuthService>` and branch on the capability
//! instead of consulting global state.

use crate::config::GoogleOauthConfig;
use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{Account, ExternalProfile};
use crate::services::resolver::resolve_account;
use crate::services::session::SessionIssuer;
use serde::Deserialize;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Successful login: the resolved account and its freshly minted token.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub account: Account,
    pub token: String,
}

/// Google OAuth client, stateless across requests.
#[derive(Clone)]
pub struct GoogleAuthService {
    client_id: String,
    client_secret: String,
    callback_url: String,
    http: reqwest::Client,
}

/// Token endpoint response (only the access token is used).
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Userinfo document as returned by Google's v3 endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// Stable subject identifier
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl ExternalProfile {
    /// Map the provider document to a verified profile.
    ///
    /// A provider that reports no email or no picture violates the
    /// upstream contract; the flow aborts before any account mutation.
    pub fn from_userinfo(info: GoogleUserInfo) -> Result<Self> {
        let email = info
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::MalformedProfile("profile has no email".to_string()))?;
        let avatar_url = info
            .picture
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::MalformedProfile("profile has no picture".to_string()))?;

        Ok(Self {
            google_id: info.sub,
            display_name: info.name.unwrap_or_default(),
            email,
            avatar_url,
        })
    }
}

impl GoogleAuthService {
    pub fn new(config: GoogleOauthConfig) -> Self {
        Self {
            client_id: config.client_id,
            client_secret: config.client_secret,
            callback_url: config.callback_url,
            http: reqwest::Client::new(),
        }
    }

    /// Build the consent-screen URL the login endpoint redirects to.
    pub fn authorize_url(&self, oauth_state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope=openid%20email%20profile&state={}",
            GOOGLE_AUTH_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.callback_url),
            oauth_state
        )
    }

    /// Complete a login attempt from the provider's callback.
    ///
    /// Single completion, no internal retries: the first failing stage
    /// (exchange, userinfo, profile mapping, resolution, issuance) is
    /// terminal for this attempt and nothing partial is returned.
    pub async fn handle_callback(
        &self,
        db: &Db,
        sessions: &SessionIssuer,
        code: &str,
    ) -> Result<LoginSession> {
        let access_token = self.exchange_code(code).await?;
        let userinfo = self.fetch_userinfo(&access_token).await?;
        finish_login(db, sessions, userinfo).await
    }

    /// Exchange the authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<String> {
        let response = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.callback_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Token exchange returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Invalid token response: {}", e)))?;

        Ok(token.access_token)
    }

    /// Fetch the verified profile for an access token.
    async fn fetch_userinfo(&self, access_token: &str) -> Result<GoogleUserInfo> {
        let response = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Provider(format!(
                "Userinfo returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Invalid userinfo response: {}", e)))
    }
}

/// Turn a fetched userinfo document into a completed login.
///
/// Split from [`GoogleAuthService::handle_callback`] so the post-exchange
/// stages can be exercised without a live provider.
pub async fn finish_login(
    db: &Db,
    sessions: &SessionIssuer,
    userinfo: GoogleUserInfo,
) -> Result<LoginSession> {
    let profile = ExternalProfile::from_userinfo(userinfo)?;
    let account = resolve_account(db, &profile).await?;
    let token = sessions.issue(&account)?;

    tracing::info!(
        account_id = %account.id,
        google_id = %account.google_id,
        "Login completed"
    );

    Ok(LoginSession { account, token })
}
