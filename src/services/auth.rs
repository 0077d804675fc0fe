use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use rusqlite::Connection;
use sha1::Sha1;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Session, User};

const MIN_PASSWORD_LEN: usize = 6;

pub fn hash_password(secret: &str, password: &str) -> anyhow::Result<String> {
    let mut mac = Hmac::<Sha1>::new_from_slice(secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("invalid hmac key: {e}"))?;
    mac.update(password.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

pub fn verify_password(secret: &str, password: &str, expected_hash: &str) -> bool {
    hash_password(secret, password)
        .map(|h| h == expected_hash)
        .unwrap_or(false)
}

fn issue_session(conn: &Connection, user_id: &str) -> Result<Session, AppError> {
    let session = Session {
        token: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        created_at: chrono::Utc::now().naive_utc(),
    };
    queries::create_session(conn, &session)?;
    Ok(session)
}

pub fn register(
    conn: &Connection,
    secret: &str,
    email: &str,
    password: &str,
) -> Result<Session, AppError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::AuthFailed("a valid email is required".to_string()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::AuthFailed(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if queries::get_user_by_email(conn, &email)?.is_some() {
        return Err(AppError::AuthFailed(
            "an account with that email already exists".to_string(),
        ));
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        email: email.clone(),
        password_hash: hash_password(secret, password)?,
        created_at: chrono::Utc::now().naive_utc(),
    };
    queries::create_user(conn, &user)?;
    tracing::info!(email = %email, "registered admin account");

    issue_session(conn, &user.id)
}

pub fn sign_in(
    conn: &Connection,
    secret: &str,
    email: &str,
    password: &str,
) -> Result<Session, AppError> {
    let email = email.trim().to_lowercase();
    let user = queries::get_user_by_email(conn, &email)?
        .ok_or_else(|| AppError::AuthFailed("invalid email or password".to_string()))?;

    if !verify_password(secret, password, &user.password_hash) {
        return Err(AppError::AuthFailed("invalid email or password".to_string()));
    }

    issue_session(conn, &user.id)
}

pub fn sign_out(conn: &Connection, token: &str) -> Result<bool, AppError> {
    Ok(queries::delete_session(conn, token)?)
}
