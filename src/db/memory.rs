// SPDX-License-Identifier: MIT

//! In-memory record store for local development and tests.

use crate::db::DbError;
use crate::models::{Account, ContactMessage};
use dashmap::DashMap;
use std::sync::Arc;

/// DashMap-backed store. The map entry API makes the account insert
/// atomic, mirroring Firestore's create-if-absent semantics.
#[derive(Clone, Default)]
pub struct MemoryStore {
    accounts: Arc<DashMap<String, Account>>,
    contacts: Arc<DashMap<String, ContactMessage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_account(&self, google_id: &str) -> Option<Account> {
        self.accounts.get(google_id).map(|a| a.value().clone())
    }

    pub fn find_account_by_id(&self, id: &str) -> Option<Account> {
        self.accounts
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.value().clone())
    }

    pub fn insert_account(&self, account: &Account) -> Result<(), DbError> {
        match self.accounts.entry(account.google_id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(DbError::AlreadyExists),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(account.clone());
                Ok(())
            }
        }
    }

    pub fn insert_contact(&self, message: &ContactMessage) {
        self.contacts.insert(message.id.clone(), message.clone());
    }

    /// Number of stored accounts (test helper).
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Number of stored contact messages (test helper).
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }
}
