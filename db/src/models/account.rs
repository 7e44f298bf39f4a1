use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// The persisted account row. Deliberately not `Serialize`: anything that
/// leaves the process goes through [`AccountView`], which has no field for
/// the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub subscription_start_date: DateTime<Utc>,
    pub total_subscription_days: i64,
}

/// External projection of an [`Account`].
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: Uuid,
    pub email: String,
    pub subscription_start_date: DateTime<Utc>,
    pub total_subscription_days: i64,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        AccountView {
            id: account.id,
            email: account.email,
            subscription_start_date: account.subscription_start_date,
            total_subscription_days: account.total_subscription_days,
        }
    }
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        account.clone().into()
    }
}
