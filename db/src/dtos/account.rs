use chrono::{DateTime, Utc};

/// Everything the store needs to create an account. The id is assigned by
/// the store itself.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub subscription_start_date: DateTime<Utc>,
    pub total_subscription_days: i64,
}

/// Partial update applied by [`crate::store::AccountStore::update_by_id`].
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub subscription_start_date: Option<DateTime<Utc>>,
    pub total_subscription_days: Option<i64>,
}
