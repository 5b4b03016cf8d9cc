//! Account registration and credential checks.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use common::RegisterRequest;
use model::entities::{app_user, home, home_user_connection};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use validator::Validate;

/// Name of the home every new account starts with.
pub const DEFAULT_HOME_NAME: &str = "My Home";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Invalid(String),
    #[error("That username is already taken.")]
    UsernameTaken,
    #[error("Invalid username or password.")]
    BadCredentials,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is unreadable: {}", e);
            false
        }
    }
}

/// Flattens validator output into the messages shown to the user.
fn validation_messages(request: &RegisterRequest) -> Result<(), AuthError> {
    let Err(errors) = request.validate() else {
        return Ok(());
    };

    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect();
    messages.sort();
    Err(AuthError::Invalid(messages.join(" ")))
}

/// Creates the user, a default home and the link between them in one
/// transaction. Returns the user and the new home.
pub async fn register_user(
    db: &DatabaseConnection,
    request: &RegisterRequest,
) -> Result<(app_user::Model, home::Model), AuthError> {
    let request = request.normalized();
    validation_messages(&request)?;

    if app_user::Entity::find_by_id(request.username.clone())
        .one(db)
        .await?
        .is_some()
    {
        debug!("Registration rejected, username {} exists", request.username);
        return Err(AuthError::UsernameTaken);
    }

    let password_hash = hash_password(&request.password)?;

    let txn = db.begin().await?;
    let user = app_user::ActiveModel {
        username: Set(request.username.clone()),
        email: Set(request.email.clone()),
        password_hash: Set(password_hash),
    }
    .insert(&txn)
    .await?;

    let home = home::ActiveModel {
        name: Set(DEFAULT_HOME_NAME.to_string()),
        address: Set(String::new()),
        city: Set(String::new()),
        state: Set(String::new()),
        zip_code: Set(String::new()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    home_user_connection::ActiveModel {
        username: Set(user.username.clone()),
        home_id: Set(home.id),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!("Registered user {} with home {}", user.username, home.id);
    Ok((user, home))
}

pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<app_user::Model, AuthError> {
    let user = app_user::Entity::find()
        .filter(app_user::Column::Username.eq(username.trim()))
        .one(db)
        .await?
        .ok_or(AuthError::BadCredentials)?;

    if verify_password(password, &user.password_hash) {
        Ok(user)
    } else {
        debug!("Wrong password for {}", user.username);
        Err(AuthError::BadCredentials)
    }
}
