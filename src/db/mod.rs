// SPDX-License-Identifier: MIT

//! Record store with two backends: Firestore in production, an in-memory
//! map for local development and tests.
//!
//! Both backends enforce one account per Google identity: inserting an
//! account whose `google_id` is already taken fails with
//! [`DbError::AlreadyExists`]. The resolver relies on that constraint to
//! settle concurrent first-time logins without in-process locks.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Account, ContactMessage};

/// Collection names as constants.
pub mod collections {
    pub const ACCOUNTS: &str = "accounts";
    pub const CONTACT_MESSAGES: &str = "contact_messages";
}

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The federation key is already taken; a racing flow won the insert.
    #[error("account already exists for this identity")]
    AlreadyExists,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        AppError::Database(err.to_string())
    }
}

/// Record store handle, cheap to clone.
#[derive(Clone)]
pub enum Db {
    Firestore(FirestoreStore),
    Memory(MemoryStore),
}

impl Db {
    /// Connect to Firestore for the given project.
    pub async fn firestore(project_id: &str) -> Result<Self, DbError> {
        Ok(Self::Firestore(FirestoreStore::new(project_id).await?))
    }

    /// In-memory store for local development and tests.
    pub fn in_memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Look up an account by its Google identity key.
    pub async fn find_account(&self, google_id: &str) -> Result<Option<Account>, DbError> {
        match self {
            Self::Firestore(store) => store.find_account(google_id).await,
            Self::Memory(store) => Ok(store.find_account(google_id)),
        }
    }

    /// Look up an account by its system-assigned id (the session subject).
    pub async fn find_account_by_id(&self, id: &str) -> Result<Option<Account>, DbError> {
        match self {
            Self::Firestore(store) => store.find_account_by_id(id).await,
            Self::Memory(store) => Ok(store.find_account_by_id(id)),
        }
    }

    /// Insert a newly provisioned account.
    ///
    /// Fails with [`DbError::AlreadyExists`] if an account for the same
    /// `google_id` was committed first.
    pub async fn insert_account(&self, account: &Account) -> Result<(), DbError> {
        match self {
            Self::Firestore(store) => store.insert_account(account).await,
            Self::Memory(store) => store.insert_account(account),
        }
    }

    /// Persist a contact-form message.
    pub async fn insert_contact(&self, message: &ContactMessage) -> Result<(), DbError> {
        match self {
            Self::Firestore(store) => store.insert_contact(message).await,
            Self::Memory(store) => {
                store.insert_contact(message);
                Ok(())
            }
        }
    }
}
