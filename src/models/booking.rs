use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A confirmed reservation of one slot at one facility on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub facility_id: String,
    pub date: NaiveDate,
    /// Slot time-of-day, "HH:MM".
    pub time: String,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// True when this booking occupies the given (facility, date, slot) cell.
    pub fn occupies(&self, facility_id: &str, date: NaiveDate, time: &str) -> bool {
        self.facility_id == facility_id && self.date == date && self.time == time
    }
}

/// One (facility, date, slot) tuple to materialize into a `Booking`.
/// Block and recurring requests expand into a list of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub facility_id: String,
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingEventKind {
    Created,
    Cancelled,
}

/// Broadcast to SSE subscribers whenever the store changes.
#[derive(Debug, Clone, Serialize)]
pub struct BookingEvent {
    pub kind: BookingEventKind,
    pub booking: Booking,
}
