use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::export::{export, ExportFormat};
use crate::state::AppState;

// GET /api/export. Auth via query token: a download link can't set headers.
#[derive(Deserialize)]
pub struct ExportQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub format: String,
    pub token: Option<String>,
}

pub async fn export_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    super::require_session_token(&state, query.token.as_deref())?;

    if query.end < query.start {
        return Err(AppError::Validation("end date before start date".to_string()));
    }
    let format = ExportFormat::parse(&query.format)?;

    let file = {
        let store = state.store.lock().unwrap();
        export(store.all(), query.start, query.end, format)?
    };

    tracing::info!(
        filename = %file.filename,
        bytes = file.bytes.len(),
        "exported bookings"
    );

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response())
}
