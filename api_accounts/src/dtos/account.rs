use chrono::{DateTime, Utc};
use db::models::account::AccountView;
use serde::{Deserialize, Serialize};

use crate::services::entitlement::TimeLeft;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub total_subscription_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub account: AccountView,
    pub time_left: TimeLeft,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Generic merge-update. `email` selects the account; every other field is
/// optional and only applied when present.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub email: String,
    #[serde(default)]
    pub new_email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub subscription_start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_subscription_days: Option<i64>,
}

/// Field changes carried by [`UpdateAccountRequest`], detached from the
/// selector email.
#[derive(Debug, Default)]
pub struct AccountUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub subscription_start_date: Option<DateTime<Utc>>,
    pub total_subscription_days: Option<i64>,
}

impl From<UpdateAccountRequest> for AccountUpdate {
    fn from(req: UpdateAccountRequest) -> Self {
        AccountUpdate {
            email: req.new_email,
            password: req.password,
            subscription_start_date: req.subscription_start_date,
            total_subscription_days: req.total_subscription_days,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChangeEmailRequest {
    pub email: String,
    pub new_email: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub email: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtendSubscriptionRequest {
    pub email: String,
    pub additional_days: i64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub email: String,
}
