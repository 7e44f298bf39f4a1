use std::{collections::HashMap, sync::RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    dtos::account::{AccountChanges, NewAccount},
    models::account::Account,
    store::{AccountStore, StoreError},
};

/// HashMap-backed account store. Used by the test suites and handy for
/// running the server without a database. The lock is never held across
/// an await point.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().expect("account map lock poisoned");
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().expect("account map lock poisoned");
        if accounts.values().any(|a| a.email == account.email) {
            return Err(StoreError::DuplicateEmail(account.email));
        }
        let account = Account {
            id: Uuid::new_v4(),
            email: account.email,
            password_hash: account.password_hash,
            subscription_start_date: account.subscription_start_date,
            total_subscription_days: account.total_subscription_days,
        };
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: AccountChanges,
    ) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().expect("account map lock poisoned");
        if let Some(new_email) = &changes.email {
            if accounts
                .values()
                .any(|a| a.id != id && a.email == *new_email)
            {
                return Err(StoreError::DuplicateEmail(new_email.clone()));
            }
        }
        let account = accounts.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(email) = changes.email {
            account.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            account.password_hash = password_hash;
        }
        if let Some(start) = changes.subscription_start_date {
            account.subscription_start_date = start;
        }
        if let Some(days) = changes.total_subscription_days {
            account.total_subscription_days = days;
        }
        Ok(account.clone())
    }

    async fn delete_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let mut accounts = self.accounts.write().expect("account map lock poisoned");
        let id = accounts
            .values()
            .find(|a| a.email == email)
            .map(|a| a.id);
        Ok(id.and_then(|id| accounts.remove(&id)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            subscription_start_date: Utc::now(),
            total_subscription_days: 0,
        }
    }

    #[tokio::test]
    async fn insert_assigns_an_id_and_find_returns_the_row() {
        let store = InMemoryAccountStore::new();
        let inserted = store.insert(new_account("a@example.com")).await.unwrap();

        let found = store.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, inserted.id);
        assert!(store.find_by_email("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_rejects_a_taken_email() {
        let store = InMemoryAccountStore::new();
        store.insert(new_account("a@example.com")).await.unwrap();

        let err = store.insert(new_account("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn update_rejects_an_email_taken_by_another_account() {
        let store = InMemoryAccountStore::new();
        let first = store.insert(new_account("a@example.com")).await.unwrap();
        store.insert(new_account("b@example.com")).await.unwrap();

        let err = store
            .update_by_id(
                first.id,
                AccountChanges {
                    email: Some("b@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));

        // Re-asserting its own email is not a conflict.
        store
            .update_by_id(
                first.id,
                AccountChanges {
                    email: Some("a@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_applies_only_the_present_fields() {
        let store = InMemoryAccountStore::new();
        let inserted = store.insert(new_account("a@example.com")).await.unwrap();

        let updated = store
            .update_by_id(
                inserted.id,
                AccountChanges {
                    total_subscription_days: Some(30),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.total_subscription_days, 30);
        assert_eq!(updated.email, inserted.email);
        assert_eq!(updated.password_hash, inserted.password_hash);
        assert_eq!(
            updated.subscription_start_date,
            inserted.subscription_start_date
        );
    }

    #[tokio::test]
    async fn update_of_a_missing_id_is_not_found() {
        let store = InMemoryAccountStore::new();
        let err = store
            .update_by_id(Uuid::new_v4(), AccountChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn delete_returns_the_removed_row_once() {
        let store = InMemoryAccountStore::new();
        store.insert(new_account("a@example.com")).await.unwrap();

        let deleted = store.delete_by_email("a@example.com").await.unwrap();
        assert_eq!(deleted.unwrap().email, "a@example.com");
        assert!(store.delete_by_email("a@example.com").await.unwrap().is_none());
    }
}
