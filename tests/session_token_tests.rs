// SPDX-License-Identifier: MIT

//! Session token tests.
//!
//! Tokens minted by the issuer must decode with plain jsonwebtoken and the
//! shared secret, carry the account id as subject, and span exactly seven
//! days. This pins the wire format independently of the issuer's own
//! verify method.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use wayfarer_api::models::{Account, ExternalProfile};
use wayfarer_api::services::session::SESSION_TTL_SECS;
use wayfarer_api::services::SessionIssuer;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

fn test_account() -> Account {
    Account::from_profile(&ExternalProfile {
        google_id: "g-1".to_string(),
        display_name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        avatar_url: "http://x/a.png".to_string(),
    })
}

#[test]
fn test_token_decodes_without_the_issuer() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let issuer = SessionIssuer::new(signing_key.to_vec());
    let account = test_account();

    let token = issuer.issue(&account).unwrap();

    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(&token, &key, &validation)
        .expect("token should decode with the shared secret alone");

    assert_eq!(data.claims.sub, account.id);
}

#[test]
fn test_token_window_is_exactly_seven_days() {
    let issuer = SessionIssuer::new(b"test_signing_key_32_bytes_long!!".to_vec());

    let token = issuer.issue(&test_account()).unwrap();
    let claims = issuer.verify(&token).unwrap();

    assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
    assert_eq!(SESSION_TTL_SECS, 7 * 24 * 60 * 60);
}

#[test]
fn test_tampered_token_rejected() {
    let issuer = SessionIssuer::new(b"test_signing_key_32_bytes_long!!".to_vec());
    let token = issuer.issue(&test_account()).unwrap();

    // Chop the end of the signature segment
    let tampered = &token[..token.len() - 4];
    assert!(issuer.verify(tampered).is_err());
}
