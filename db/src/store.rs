use async_trait::async_trait;
use common::error::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    dtos::account::{AccountChanges, NewAccount},
    models::account::Account,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("account with email {0} already exists")]
    DuplicateEmail(String),

    #[error("account not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Storage boundary for accounts. The service layer only talks to this
/// trait; Postgres and the in-memory map used by tests both implement it.
///
/// Email uniqueness is enforced here, not by the callers: `insert` and
/// `update_by_id` report a conflict as [`StoreError::DuplicateEmail`].
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: AccountChanges,
    ) -> Result<Account, StoreError>;

    async fn delete_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => AppError::DuplicateEmail(email),
            StoreError::NotFound => AppError::NotFound("User not found".to_string()),
            StoreError::Database(error) => AppError::Database(error),
        }
    }
}
