use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An admin account. Password is stored as an HMAC digest, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// A signed-in session, identified by its bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: NaiveDateTime,
}
