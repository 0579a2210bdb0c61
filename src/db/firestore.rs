// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Accounts are stored with the Google identity key as the document id,
//! so a plain create doubles as the uniqueness constraint on that key.

use crate::db::{collections, DbError};
use crate::models::{Account, ContactMessage};

/// Firestore-backed record store.
#[derive(Clone)]
pub struct FirestoreStore {
    client: firestore::FirestoreDb,
}

impl FirestoreStore {
    /// Create a new Firestore client.
    ///
    /// For local development with the emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, DbError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::new_emulator(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| DbError::Unavailable(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn new_emulator(project_id: &str) -> Result<Self, DbError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            DbError::Unavailable(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Get an account by Google identity key.
    pub async fn find_account(&self, google_id: &str) -> Result<Option<Account>, DbError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::ACCOUNTS)
            .obj()
            .one(google_id)
            .await
            .map_err(|e| DbError::Unavailable(e.to_string()))
    }

    /// Get an account by its system-assigned id.
    pub async fn find_account_by_id(&self, id: &str) -> Result<Option<Account>, DbError> {
        let id = id.to_string();
        let accounts: Vec<Account> = self
            .client
            .fluent()
            .select()
            .from(collections::ACCOUNTS)
            .filter(move |q| q.field("id").eq(id.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| DbError::Unavailable(e.to_string()))?;
        Ok(accounts.into_iter().next())
    }

    /// Create an account document keyed by Google identity.
    ///
    /// Uses create semantics (not upsert): an existing document for the
    /// same key makes the write fail, which we surface as `AlreadyExists`.
    pub async fn insert_account(&self, account: &Account) -> Result<(), DbError> {
        let _: Account = self
            .client
            .fluent()
            .insert()
            .into(collections::ACCOUNTS)
            .document_id(&account.google_id)
            .object(account)
            .execute()
            .await
            .map_err(classify_insert_error)?;
        Ok(())
    }

    /// Store a contact-form message.
    pub async fn insert_contact(&self, message: &ContactMessage) -> Result<(), DbError> {
        let _: ContactMessage = self
            .client
            .fluent()
            .insert()
            .into(collections::CONTACT_MESSAGES)
            .document_id(&message.id)
            .object(message)
            .execute()
            .await
            .map_err(classify_insert_error)?;
        Ok(())
    }
}

/// Distinguish a lost create race from genuine storage failure.
fn classify_insert_error(err: firestore::errors::FirestoreError) -> DbError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();
    if lower.contains("already exists") || lower.contains("alreadyexists") {
        DbError::AlreadyExists
    } else {
        DbError::Unavailable(msg)
    }
}
