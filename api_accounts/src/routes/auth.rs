use actix_web::{Responder, post, web};
use chrono::Utc;
use common::error::Res;
use common::http::Success;
use db::{models::account::AccountView, store::AccountStore};

use crate::dtos::account::{LoginRequest, LoginResponse};
use crate::services::{self, entitlement::TimeLeft};

/// Authenticates a user with email and password and reports the remaining
/// subscription time.
///
/// # Input
/// - `login_data`: JSON payload containing email and password
/// - `store`: Account storage handle
///
/// # Output
/// - Success: 200 with a message, the account (without the password hash)
///   and the remaining-time breakdown
/// - Error: 401 Unauthorized for an unknown email or a wrong password,
///   403 Forbidden for an expired subscription
///
/// # Frontend Example
/// ```javascript
/// // Using fetch API
/// const response = await fetch('/login', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json'
///   },
///   body: JSON.stringify({
///     email: 'user@example.com',
///     password: 'securepassword'
///   })
/// });
///
/// if (response.ok) {
///   const data = await response.json();
///   // "Login successful - 4 days 23 hours and 59 minutes left"
///   console.log(data.message, data.account);
/// }
/// ```
#[post("")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    store: web::Data<dyn AccountStore>,
) -> Res<impl Responder> {
    let LoginRequest { email, password } = login_data.into_inner();

    match services::account::authenticate(store.get_ref(), &email, &password, Utc::now()).await {
        Ok((account, time_left)) => {
            let remaining = format_time_left(&time_left);
            log::info!(
                "[LOGIN ATTEMPT] Email: {}, Subscription Remaining: {}",
                email,
                remaining
            );
            Success::ok(LoginResponse {
                message: format!("Login successful - {}", remaining),
                account: AccountView::from(account),
                time_left,
            })
        }
        Err(error) => {
            log::error!("[LOGIN ATTEMPT] Email: {}, Error: {}", email, error);
            Err(error)
        }
    }
}

/// Renders the breakdown with correct singular/plural forms, e.g.
/// "1 day 0 hours and 59 minutes left".
fn format_time_left(time_left: &TimeLeft) -> String {
    let days = pluralize(time_left.days, "day");
    let hours = pluralize(time_left.hours, "hour");
    let minutes = pluralize(time_left.minutes, "minute");
    format!("{} {} and {} left", days, hours, minutes)
}

fn pluralize(amount: i64, unit: &str) -> String {
    if amount == 1 {
        format!("{} {}", amount, unit)
    } else {
        format!("{} {}s", amount, unit)
    }
}
