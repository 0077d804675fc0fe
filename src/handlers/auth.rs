use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::auth;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
}

// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = {
        let db = state.db.lock().unwrap();
        auth::register(&db, &state.config.session_secret, &body.email, &body.password)?
    };
    Ok(Json(SessionResponse { token: session.token }))
}

// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = {
        let db = state.db.lock().unwrap();
        auth::sign_in(&db, &state.config.session_secret, &body.email, &body.password)?
    };
    Ok(Json(SessionResponse { token: session.token }))
}

// POST /api/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let session = super::require_session(&state, &headers)?;
    {
        let db = state.db.lock().unwrap();
        auth::sign_out(&db, &session.token)?;
    }
    Ok(Json(serde_json::json!({"ok": true})))
}
