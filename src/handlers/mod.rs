pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod events;
pub mod export;
pub mod health;

use axum::http::HeaderMap;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Session;
use crate::state::AppState;

/// Resolves the bearer token from the Authorization header to a session.
pub fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Session, AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let db = state.db.lock().unwrap();
    queries::get_session(&db, token)?.ok_or(AppError::Unauthorized)
}

/// Same check for endpoints reached by plain links (downloads, SSE), which
/// cannot set an Authorization header.
pub fn require_session_token(state: &AppState, token: Option<&str>) -> Result<Session, AppError> {
    let token = token.unwrap_or("");
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }
    let db = state.db.lock().unwrap();
    queries::get_session(&db, token)?.ok_or(AppError::Unauthorized)
}
