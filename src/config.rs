//! Application configuration loaded from environment variables.
//!
//! Google sign-in is a process-lifetime capability: the three OAuth
//! variables are checked exactly once here, and the feature stays off
//! for the life of the process if any of them is missing.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for post-login redirects and CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// GCP project ID; `None` selects the in-memory store
    pub gcp_project_id: Option<String>,
    /// Google OAuth settings; `None` means sign-in is disabled
    pub google: Option<GoogleOauthConfig>,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

/// The three values that must all be present for Google sign-in.
#[derive(Debug, Clone)]
pub struct GoogleOauthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A missing `TOKEN_SIGNING_SECRET` is a hard error: sessions cannot
    /// be minted or verified without it, so we fail at startup instead of
    /// on the first login. Missing OAuth variables only disable sign-in.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let google = match (
            env::var("CLIENT_ID"),
            env::var("CLIENT_SECRET"),
            env::var("CALLBACK_URL"),
        ) {
            (Ok(client_id), Ok(client_secret), Ok(callback_url)) => Some(GoogleOauthConfig {
                client_id: client_id.trim().to_string(),
                client_secret: client_secret.trim().to_string(),
                callback_url: callback_url.trim().to_string(),
            }),
            _ => {
                tracing::warn!(
                    "Google OAuth not configured. Set CLIENT_ID, CLIENT_SECRET and CALLBACK_URL to enable it."
                );
                None
            }
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            gcp_project_id: env::var("GCP_PROJECT_ID").ok(),
            google,
            jwt_signing_key: env::var("TOKEN_SIGNING_SECRET")
                .map_err(|_| ConfigError::Missing("TOKEN_SIGNING_SECRET"))?
                .into_bytes(),
        })
    }

    /// Default config for tests, with Google sign-in enabled.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            gcp_project_id: None,
            google: Some(GoogleOauthConfig {
                client_id: "test_client_id".to_string(),
                client_secret: "test_client_secret".to_string(),
                callback_url: "http://localhost:8080/auth/google/callback".to_string(),
            }),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because env vars are process-wide and tests run in parallel.
    #[test]
    fn test_config_from_env() {
        env::set_var("CLIENT_ID", "test_id");
        env::set_var("CLIENT_SECRET", "test_secret");
        env::set_var("CALLBACK_URL", "http://localhost:8080/auth/google/callback");
        env::remove_var("TOKEN_SIGNING_SECRET");

        // Missing signing secret is fatal even with OAuth fully configured
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::Missing("TOKEN_SIGNING_SECRET"))
        ));

        env::set_var("TOKEN_SIGNING_SECRET", "test_jwt_key_32_bytes_minimum!!!");

        let config = Config::from_env().expect("Config should load");
        let google = config.google.expect("Google OAuth should be enabled");
        assert_eq!(google.client_id, "test_id");
        assert_eq!(google.client_secret, "test_secret");
        assert_eq!(config.port, 8080);
    }
}
