use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::facility::{facilities, facility_by_id};
use crate::models::Facility;
use crate::services::availability::{build_grid, AvailabilityGrid};
use crate::services::recurrence::TimeRange;
use crate::state::AppState;

static DASHBOARD_HTML: &str = include_str!("../web/admin.html");

pub async fn app_page() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

pub async fn redirect_to_app() -> Redirect {
    Redirect::permanent("/app")
}

// GET /api/facilities
pub async fn get_facilities(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Facility>>, AppError> {
    super::require_session(&state, &headers)?;
    Ok(Json(facilities()))
}

// GET /api/grid
#[derive(Deserialize)]
pub struct GridQuery {
    pub facility_id: String,
    pub start: NaiveDate,
    /// Defaults to `start` for a single-day view.
    pub end: Option<NaiveDate>,
    pub select_start: Option<String>,
    pub select_end: Option<String>,
}

pub async fn get_grid(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<GridQuery>,
) -> Result<Json<AvailabilityGrid>, AppError> {
    super::require_session(&state, &headers)?;

    if facility_by_id(&query.facility_id).is_none() {
        return Err(AppError::NotFound(format!("facility {}", query.facility_id)));
    }

    let end = query.end.unwrap_or(query.start);
    if end < query.start {
        return Err(AppError::Validation("end date before start date".to_string()));
    }

    if (end - query.start).num_days() >= 31 {
        return Err(AppError::Validation("date range too large".to_string()));
    }

    let mut dates = Vec::new();
    let mut date = query.start;
    while date <= end {
        dates.push(date);
        date = date + chrono::Duration::days(1);
    }

    let selection = match (query.select_start, query.select_end) {
        (Some(start), Some(end)) => Some(TimeRange { start, end }),
        _ => None,
    };

    let store = state.store.lock().unwrap();
    let grid = build_grid(&query.facility_id, &dates, store.all(), selection.as_ref());
    Ok(Json(grid))
}
