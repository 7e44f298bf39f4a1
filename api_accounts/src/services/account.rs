use actix_web::web;
use chrono::{DateTime, Utc};
use common::error::{AppError, Res};
use db::{
    dtos::account::{AccountChanges, NewAccount},
    models::account::Account,
    store::AccountStore,
};

use crate::{
    dtos::account::{AccountUpdate, CreateAccountRequest},
    services::{
        credentials,
        entitlement::{self, TimeLeft},
        policy,
    },
};

/// Creates an account with a freshly hashed password and the subscription
/// fields initialized. The email conflict check is left to the store.
pub async fn create_account(store: &dyn AccountStore, req: CreateAccountRequest) -> Res<Account> {
    if !policy::is_well_formed_email(&req.email) {
        return Err(AppError::Validation(format!(
            "{} is not a valid email",
            req.email
        )));
    }
    let initial_days = req.total_subscription_days.unwrap_or(0);
    if initial_days < 0 {
        return Err(AppError::Validation(
            "Subscription days cannot be less than 0".to_string(),
        ));
    }

    let password_hash = hash_checked(req.password).await?;
    let account = store
        .insert(NewAccount {
            email: req.email,
            password_hash,
            subscription_start_date: Utc::now(),
            total_subscription_days: initial_days,
        })
        .await?;
    Ok(account)
}

/// Authenticates a login attempt and computes the remaining entitlement.
///
/// An unknown email and a wrong password produce the same error. Expiry is
/// reported separately, since at that point identity is already proven. A
/// successful login mutates nothing.
pub async fn authenticate(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Res<(Account, TimeLeft)> {
    let account = store
        .find_by_email(email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let hash = account.password_hash.clone();
    let password = password.to_string();
    let matches = web::block(move || credentials::verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))?;
    if !matches {
        return Err(AppError::InvalidCredentials);
    }

    let time_left = entitlement::time_left(
        account.subscription_start_date,
        account.total_subscription_days,
        now,
    );
    if time_left.is_expired {
        return Err(AppError::SubscriptionExpired);
    }

    Ok((account, time_left))
}

pub async fn get_account(store: &dyn AccountStore, email: &str) -> Res<Account> {
    store
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub async fn change_password(
    store: &dyn AccountStore,
    email: &str,
    new_password: String,
) -> Res<Account> {
    let account = get_account(store, email).await?;
    let password_hash = hash_checked(new_password).await?;
    let updated = store
        .update_by_id(
            account.id,
            AccountChanges {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await?;
    Ok(updated)
}

pub async fn change_email(
    store: &dyn AccountStore,
    email: &str,
    new_email: String,
) -> Res<Account> {
    if !policy::is_well_formed_email(&new_email) {
        return Err(AppError::Validation(format!(
            "{} is not a valid email",
            new_email
        )));
    }
    let account = get_account(store, email).await?;
    let updated = store
        .update_by_id(
            account.id,
            AccountChanges {
                email: Some(new_email),
                ..Default::default()
            },
        )
        .await?;
    Ok(updated)
}

/// Applies the entitlement extension rule: stack days onto a live
/// subscription, restart an expired one at `now`.
pub async fn extend_subscription(
    store: &dyn AccountStore,
    email: &str,
    additional_days: i64,
    now: DateTime<Utc>,
) -> Res<Account> {
    if additional_days < 0 {
        return Err(AppError::Validation(
            "Additional days cannot be less than 0".to_string(),
        ));
    }
    let account = get_account(store, email).await?;
    let (start, total) = entitlement::extend(
        account.subscription_start_date,
        account.total_subscription_days,
        additional_days,
        now,
    );
    let updated = store
        .update_by_id(
            account.id,
            AccountChanges {
                subscription_start_date: Some(start),
                total_subscription_days: Some(total),
                ..Default::default()
            },
        )
        .await?;
    Ok(updated)
}

/// Generic merge-update. A password in the partial data goes through the
/// same validate-then-hash path as [`change_password`]; it is never stored
/// verbatim.
pub async fn update_account(
    store: &dyn AccountStore,
    email: &str,
    update: AccountUpdate,
) -> Res<Account> {
    let mut changes = AccountChanges {
        subscription_start_date: update.subscription_start_date,
        ..Default::default()
    };
    if let Some(new_email) = update.email {
        if !policy::is_well_formed_email(&new_email) {
            return Err(AppError::Validation(format!(
                "{} is not a valid email",
                new_email
            )));
        }
        changes.email = Some(new_email);
    }
    if let Some(password) = update.password {
        changes.password_hash = Some(hash_checked(password).await?);
    }
    if let Some(days) = update.total_subscription_days {
        if days < 0 {
            return Err(AppError::Validation(
                "Subscription days cannot be less than 0".to_string(),
            ));
        }
        changes.total_subscription_days = Some(days);
    }

    let account = get_account(store, email).await?;
    let updated = store.update_by_id(account.id, changes).await?;
    Ok(updated)
}

pub async fn delete_account(store: &dyn AccountStore, email: &str) -> Res<Account> {
    store
        .delete_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Runs the strength policy, then hashes on the blocking pool so the
/// argon2 work does not stall the reactor.
async fn hash_checked(plaintext: String) -> Res<String> {
    if !policy::is_acceptable(&plaintext) {
        return Err(AppError::WeakPassword);
    }
    web::block(move || credentials::hash_password(&plaintext))
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))?
}
