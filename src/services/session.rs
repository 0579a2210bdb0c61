// SPDX-License-Identifier: MIT

//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the local account id as subject with a
//! fixed seven-day validity window. They are stateless: any holder of the
//! signing secret can verify one without a store round trip, and there is
//! no revocation list.

use crate::error::{AppError, Result};
use crate::models::Account;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Session lifetime: 7 days.
pub const SESSION_TTL_SECS: usize = 7 * 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (local account id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Mints and verifies session tokens with a process-wide secret.
#[derive(Clone)]
pub struct SessionIssuer {
    signing_key: Vec<u8>,
}

impl SessionIssuer {
    pub fn new(signing_key: Vec<u8>) -> Self {
        Self { signing_key }
    }

    /// Mint a session token for an account.
    ///
    /// `exp - iat` is exactly [`SESSION_TTL_SECS`].
    pub fn issue(&self, account: &Account) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
            .as_secs() as usize;

        let claims = Claims {
            sub: account.id.clone(),
            iat: now,
            exp: now + SESSION_TTL_SECS,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.signing_key),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let key = DecodingKey::from_secret(&self.signing_key);
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }
}
