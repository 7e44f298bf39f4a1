use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::account::{AccountChanges, NewAccount},
    models::account::Account,
    store::{AccountStore, StoreError},
};

/// Postgres-backed account store. The `accounts` table carries the unique
/// index on `email`; a unique violation surfaces as `DuplicateEmail`.
pub struct PgAccountStore {
    pool: Arc<PgPool>,
}

impl PgAccountStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn map_insert_error(error: sqlx::Error, email: &str) -> StoreError {
    match &error {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::DuplicateEmail(email.to_string())
        }
        _ => StoreError::Database(error),
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&*self.pool)
            .await
            .map_err(StoreError::from)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, email, password_hash, subscription_start_date, total_subscription_days)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.subscription_start_date)
        .bind(account.total_subscription_days)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_insert_error(e, &account.email))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: AccountChanges,
    ) -> Result<Account, StoreError> {
        let new_email = changes.email.clone().unwrap_or_default();
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts SET
                email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                subscription_start_date = COALESCE($4, subscription_start_date),
                total_subscription_days = COALESCE($5, total_subscription_days)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(changes.subscription_start_date)
        .bind(changes.total_subscription_days)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_insert_error(e, &new_email))?
        .ok_or(StoreError::NotFound)
    }

    async fn delete_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, Account>("DELETE FROM accounts WHERE email = $1 RETURNING *")
            .bind(email)
            .fetch_optional(&*self.pool)
            .await
            .map_err(StoreError::from)
    }
}
