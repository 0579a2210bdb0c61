// SPDX-License-Identifier: MIT

//! Account resolution and provisioning.
//!
//! Maps a verified external profile to the local account, creating it on
//! first login. Idempotent per Google identity: repeat logins return the
//! stored account unchanged (first-write-wins), and a lost insert race is
//! settled by re-reading the winner's record.

use crate::db::{Db, DbError};
use crate::error::{AppError, Result};
use crate::models::{Account, ExternalProfile};

/// Find or create the account for a verified profile.
pub async fn resolve_account(db: &Db, profile: &ExternalProfile) -> Result<Account> {
    if let Some(existing) = db.find_account(&profile.google_id).await? {
        return Ok(existing);
    }

    let account = Account::from_profile(profile);
    match db.insert_account(&account).await {
        Ok(()) => {
            tracing::info!(
                google_id = %account.google_id,
                account_id = %account.id,
                "Provisioned new account"
            );
            Ok(account)
        }
        // A concurrent first login committed first; its record wins.
        Err(DbError::AlreadyExists) => {
            tracing::debug!(google_id = %profile.google_id, "Lost provisioning race, re-reading");
            db.find_account(&profile.google_id).await?.ok_or_else(|| {
                AppError::Database("account missing after losing provisioning race".to_string())
            })
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn profile(google_id: &str, name: &str) -> ExternalProfile {
        ExternalProfile {
            google_id: google_id.to_string(),
            display_name: name.to_string(),
            email: "ada@example.com".to_string(),
            avatar_url: "http://x/a.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_login_creates_account() {
        let db = Db::in_memory();

        let account = resolve_account(&db, &profile("g-1", "Ada")).await.unwrap();

        assert_eq!(account.google_id, "g-1");
        assert_eq!(account.name, "Ada");
        assert_eq!(account.email, "ada@example.com");
        assert!(!account.id.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let db = Db::in_memory();

        let first = resolve_account(&db, &profile("g-1", "Ada")).await.unwrap();
        let second = resolve_account(&db, &profile("g-1", "Ada")).await.unwrap();

        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_repeat_login_keeps_first_profile() {
        // First-write-wins: a changed display name on a later login does
        // not update the stored account.
        let db = Db::in_memory();

        let first = resolve_account(&db, &profile("g-1", "Ada")).await.unwrap();
        let second = resolve_account(&db, &profile("g-1", "Ada L."))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.name, "Ada");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_first_logins_create_one_account() {
        let db = Arc::new(Db::in_memory());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                resolve_account(&db, &profile("g-race", "Ada")).await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            let account = handle.await.unwrap().expect("resolve should not fail");
            ids.push(account.id);
        }

        // Every caller got the same account
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 1);

        match db.as_ref() {
            Db::Memory(store) => assert_eq!(store.account_count(), 1),
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_lost_race_returns_winner() {
        let db = Db::in_memory();

        // Simulate the winner committing between our lookup and insert by
        // inserting directly, then racing with a same-key insert.
        let winner = Account::from_profile(&profile("g-1", "Ada"));
        db.insert_account(&winner).await.unwrap();

        let loser = Account::from_profile(&profile("g-1", "Ada L."));
        assert!(matches!(
            db.insert_account(&loser).await,
            Err(DbError::AlreadyExists)
        ));

        let resolved = resolve_account(&db, &profile("g-1", "Ada L.")).await.unwrap();
        assert_eq!(resolved.id, winner.id);
        assert_eq!(resolved.name, "Ada");
    }
}
