use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AppError, AppResult};

use super::password::{hash_password, random_token, verify_password};
use super::store::{IdentityStore, UserRecord, normalize_email};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Default)]
pub struct IdentityService;

impl IdentityService {
    pub fn register<S: IdentityStore + ?Sized>(
        store: &S,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> AppResult<UserRecord> {
        let email = email.trim();
        validate_email(email)?;
        validate_new_password(password, confirm_password)?;

        let user = UserRecord {
            id: random_token(16),
            email: email.to_string(),
            normalized_email: normalize_email(email),
            password_hash: hash_password(password),
            created_at_unix: now_unix(),
        };
        store.insert(user.clone())?;

        tracing::info!(user_id = %user.id, "registered new account");
        Ok(user)
    }

    /// Returns the account when the credentials match, `None` otherwise.
    pub fn sign_in<S: IdentityStore + ?Sized>(
        store: &S,
        email: &str,
        password: &str,
    ) -> AppResult<Option<UserRecord>> {
        let Some(user) = store.find_by_email(email)? else {
            return Ok(None);
        };

        if !verify_password(password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Ok(None);
        }

        Ok(Some(user))
    }

    pub fn change_password<S: IdentityStore + ?Sized>(
        store: &S,
        user_id: &str,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> AppResult<()> {
        let mut user = store
            .find_by_id(user_id)?
            .ok_or_else(|| AppError::Identity(format!("no user with id {user_id}")))?;

        if !verify_password(old_password, &user.password_hash) {
            return Err(AppError::InvalidInput("incorrect password".to_string()));
        }
        validate_new_password(new_password, confirm_password)?;

        user.password_hash = hash_password(new_password);
        store.update(&user)?;

        tracing::info!(user_id = %user.id, "password changed");
        Ok(())
    }
}

fn validate_email(email: &str) -> AppResult<()> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        return Err(AppError::InvalidInput(
            "the Email field is not a valid e-mail address".to_string(),
        ));
    }

    Ok(())
}

fn validate_new_password(password: &str, confirm_password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "the Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    if password != confirm_password {
        return Err(AppError::InvalidInput(
            "the password and confirmation password do not match".to_string(),
        ));
    }

    Ok(())
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or_default()
}
