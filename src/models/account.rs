//! Account model and the verified profile it is provisioned from.

use serde::{Deserialize, Serialize};

/// Verified identity data from a completed Google OAuth exchange.
///
/// Ephemeral: mapped from the provider's userinfo document and consumed
/// by account resolution. Never persisted as-is.
#[derive(Debug, Clone)]
pub struct ExternalProfile {
    /// Stable Google subject identifier
    pub google_id: String,
    pub display_name: String,
    pub email: String,
    pub avatar_url: String,
}

/// Local account stored in Firestore, keyed by Google identity.
///
/// Profile fields are copied once at creation and not refreshed on later
/// logins (first-write-wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// System-assigned id (uuid), immutable once created
    pub id: String,
    /// Google subject id; unique, one account per external identity
    pub google_id: String,
    /// Display name at first login
    pub name: String,
    /// Email at first login
    pub email: String,
    /// Avatar URL at first login
    pub avatar_url: String,
    /// When the account was provisioned (RFC 3339)
    pub created_at: String,
}

impl Account {
    /// Build a fresh account from a verified profile.
    pub fn from_profile(profile: &ExternalProfile) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            google_id: profile.google_id.clone(),
            name: profile.display_name.clone(),
            email: profile.email.clone(),
            avatar_url: profile.avatar_url.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
