use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::facility::facility_by_id;
use crate::models::slot::slots_for_date;
use crate::models::{Booking, BookingEvent, BookingEventKind, BookingRequest};
use crate::services::recurrence::{
    block_preview, expand_block, expand_weekly, recurring_preview, TimeRange,
};
use crate::state::AppState;

const MAX_RECURRING_WEEKS: u32 = 52;

fn validate_weeks(weeks: u32) -> Result<(), AppError> {
    if weeks == 0 || weeks > MAX_RECURRING_WEEKS {
        return Err(AppError::Validation(format!(
            "recurring weeks must be between 1 and {MAX_RECURRING_WEEKS}"
        )));
    }
    Ok(())
}

// GET /api/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    super::require_session(&state, &headers)?;

    let store = state.store.lock().unwrap();
    let bookings = match (query.date, query.start, query.end) {
        (Some(date), None, None) => store.bookings_for_date(date),
        (None, Some(start), Some(end)) => store.bookings_in_range(start, end),
        (None, None, None) => store.all().to_vec(),
        _ => {
            return Err(AppError::Validation(
                "specify either date, or both start and end".to_string(),
            ))
        }
    };
    Ok(Json(bookings))
}

// POST /api/bookings
//
// One endpoint covers all four dialog flows: single, recurring single,
// block, and recurring block. A block request carries `block` (and the
// displayed `dates`); a recurring request carries `recurring_weeks`.
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub facility_id: String,
    pub date: NaiveDate,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub time: Option<String>,
    pub block: Option<TimeRange>,
    pub dates: Option<Vec<NaiveDate>>,
    pub recurring_weeks: Option<u32>,
}

#[derive(Serialize)]
pub struct CreateBookingResponse {
    pub created: Vec<Booking>,
    /// Tuples skipped because their slot was already booked.
    pub skipped: usize,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    super::require_session(&state, &headers)?;

    if body.client_name.trim().is_empty() {
        return Err(AppError::Validation("client name is required".to_string()));
    }
    if facility_by_id(&body.facility_id).is_none() {
        return Err(AppError::Validation(format!(
            "unknown facility: {}",
            body.facility_id
        )));
    }

    let mut store = state.store.lock().unwrap();

    let base = if let Some(range) = &body.block {
        let dates = body.dates.clone().unwrap_or_else(|| vec![body.date]);
        let tuples = expand_block(&body.facility_id, &dates, range, store.all());
        if tuples.is_empty() {
            return Err(AppError::Validation(
                "no available slots in the selected range".to_string(),
            ));
        }
        tuples
    } else if let Some(time) = &body.time {
        if !slots_for_date(body.date).iter().any(|s| &s.time == time) {
            return Err(AppError::Validation(format!(
                "slot {time} is not available on {}",
                body.date
            )));
        }
        vec![BookingRequest {
            facility_id: body.facility_id.clone(),
            date: body.date,
            time: time.clone(),
        }]
    } else {
        return Err(AppError::Validation(
            "either a slot time or a block range is required".to_string(),
        ));
    };

    let tuples = match body.recurring_weeks {
        Some(weeks) => {
            validate_weeks(weeks)?;
            expand_weekly(&base, weeks)
        }
        None => base,
    };

    // Each tuple is booked with its own store call; later weeks hitting an
    // existing booking are skipped, not rolled back.
    let mut created = Vec::new();
    let mut skipped = 0;
    for tuple in &tuples {
        match store.add(tuple, &body.client_name, body.client_phone.as_deref()) {
            Ok(booking) => {
                let _ = state.events_tx.send(BookingEvent {
                    kind: BookingEventKind::Created,
                    booking: booking.clone(),
                });
                created.push(booking);
            }
            Err(AppError::SlotTaken { .. }) => skipped += 1,
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        facility = %body.facility_id,
        created = created.len(),
        skipped,
        "booked slots"
    );

    Ok(Json(CreateBookingResponse { created, skipped }))
}

// POST /api/bookings/preview
#[derive(Deserialize)]
pub struct PreviewRequest {
    pub date: NaiveDate,
    pub recurring_weeks: u32,
    pub time: Option<String>,
    pub block_size: Option<usize>,
}

#[derive(Serialize)]
pub struct PreviewResponse {
    pub lines: Vec<String>,
}

pub async fn preview_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    super::require_session(&state, &headers)?;
    validate_weeks(body.recurring_weeks)?;

    let lines = match (body.block_size, body.time) {
        (Some(size), _) => block_preview(body.date, size, body.recurring_weeks),
        (None, Some(time)) => recurring_preview(body.date, &time, body.recurring_weeks),
        (None, None) => {
            return Err(AppError::Validation(
                "either a slot time or a block size is required".to_string(),
            ))
        }
    };
    Ok(Json(PreviewResponse { lines }))
}

// POST /api/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    super::require_session(&state, &headers)?;

    let removed = {
        let mut store = state.store.lock().unwrap();
        store.remove(&id)?
    };

    match removed {
        Some(booking) => {
            let _ = state.events_tx.send(BookingEvent {
                kind: BookingEventKind::Cancelled,
                booking,
            });
            Ok(Json(serde_json::json!({"ok": true})))
        }
        None => Err(AppError::NotFound(format!("booking {id}"))),
    }
}
