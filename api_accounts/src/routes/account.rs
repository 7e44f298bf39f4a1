use actix_web::{Responder, delete, get, post, put, web};
use chrono::Utc;
use common::error::Res;
use common::http::Success;
use db::{models::account::AccountView, store::AccountStore};

use crate::dtos::account::{
    ChangeEmailRequest, ChangePasswordRequest, CreateAccountRequest, DeleteAccountRequest,
    EmailQuery, ExtendSubscriptionRequest, UpdateAccountRequest,
};
use crate::services;

/// Creates a new account.
///
/// # Input
/// - `req`: JSON payload with `email`, `password` and an optional
///   `total_subscription_days` (defaults to 0)
///
/// # Output
/// - Success: 201 Created with the account view (no password hash)
/// - Error: 400 Bad Request for a malformed email or a weak password
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/users', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({
///     email: 'user@example.com',
///     password: 'Str0ng-pa$$word',
///     total_subscription_days: 30
///   })
/// });
/// ```
#[post("")]
pub async fn post_create(
    req: web::Json<CreateAccountRequest>,
    store: web::Data<dyn AccountStore>,
) -> Res<impl Responder> {
    let account = services::account::create_account(store.get_ref(), req.into_inner()).await?;
    Success::created(AccountView::from(account))
}

/// Fetches an account by email.
///
/// # Output
/// - Success: 200 with the account view
/// - Error: 404 Not Found if no account has that email
#[get("")]
pub async fn get_by_email(
    query: web::Query<EmailQuery>,
    store: web::Data<dyn AccountStore>,
) -> Res<impl Responder> {
    let account = services::account::get_account(store.get_ref(), &query.email).await?;
    Success::ok(AccountView::from(account))
}

/// Applies a generic merge-update to the account selected by `email`.
/// A `password` field goes through the same validate-then-hash path as
/// the change-password endpoint.
///
/// # Output
/// - Success: 200 with the updated account view
/// - Error: 400 for invalid fields, 404 if the account is missing
#[put("")]
pub async fn put_update(
    req: web::Json<UpdateAccountRequest>,
    store: web::Data<dyn AccountStore>,
) -> Res<impl Responder> {
    let req = req.into_inner();
    let email = req.email.clone();
    let account =
        services::account::update_account(store.get_ref(), &email, req.into()).await?;
    Success::ok(AccountView::from(account))
}

/// Replaces the account's email address.
///
/// # Output
/// - Success: 200 with the updated account view
/// - Error: 400 for a malformed new email, 404 if the account is missing
#[put("/change-email")]
pub async fn put_change_email(
    req: web::Json<ChangeEmailRequest>,
    store: web::Data<dyn AccountStore>,
) -> Res<impl Responder> {
    let req = req.into_inner();
    let account =
        services::account::change_email(store.get_ref(), &req.email, req.new_email).await?;
    Success::ok(AccountView::from(account))
}

/// Replaces the account's password after running the strength policy.
///
/// # Output
/// - Success: 200 with the account view
/// - Error: 400 for a weak password, 404 if the account is missing
#[put("/change-password")]
pub async fn put_change_password(
    req: web::Json<ChangePasswordRequest>,
    store: web::Data<dyn AccountStore>,
) -> Res<impl Responder> {
    let req = req.into_inner();
    let account =
        services::account::change_password(store.get_ref(), &req.email, req.new_password).await?;
    Success::ok(AccountView::from(account))
}

/// Extends a running subscription or restarts an expired one.
///
/// # Input
/// - `req`: JSON payload with `email` and a non-negative `additional_days`
///
/// # Output
/// - Success: 200 with the updated account view
/// - Error: 400 for negative days, 404 if the account is missing
#[put("/extend-subscription")]
pub async fn put_extend_subscription(
    req: web::Json<ExtendSubscriptionRequest>,
    store: web::Data<dyn AccountStore>,
) -> Res<impl Responder> {
    let req = req.into_inner();
    let account = services::account::extend_subscription(
        store.get_ref(),
        &req.email,
        req.additional_days,
        Utc::now(),
    )
    .await?;
    Success::ok(AccountView::from(account))
}

/// Deletes an account by email.
///
/// # Output
/// - Success: 200 with the deleted account view
/// - Error: 404 if no account has that email
#[delete("")]
pub async fn delete_by_email(
    req: web::Json<DeleteAccountRequest>,
    store: web::Data<dyn AccountStore>,
) -> Res<impl Responder> {
    let account = services::account::delete_account(store.get_ref(), &req.email).await?;
    Success::ok(AccountView::from(account))
}
