pub mod repository;

pub use repository::{BookingRepository, MemoryRepository, SqliteRepository, STORAGE_KEY};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Booking, BookingRequest};

/// In-memory booking collection mirrored to a repository on every mutation.
///
/// Double-booking is enforced here: `add` refuses a (facility, date, slot)
/// triple that already has a booking. Batch flows call `add` once per tuple
/// and skip conflicts, so there is no transactional guarantee across a set.
pub struct BookingStore {
    bookings: Vec<Booking>,
    repo: Box<dyn BookingRepository>,
}

impl BookingStore {
    pub fn open(repo: Box<dyn BookingRepository>) -> anyhow::Result<Self> {
        let bookings = repo.load()?;
        tracing::info!(count = bookings.len(), "loaded booking collection");
        Ok(Self { bookings, repo })
    }

    pub fn all(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn add(
        &mut self,
        request: &BookingRequest,
        client_name: &str,
        client_phone: Option<&str>,
    ) -> Result<Booking, AppError> {
        let client_name = client_name.trim();
        if client_name.is_empty() {
            return Err(AppError::Validation("client name is required".to_string()));
        }

        if self.booking_for_slot(&request.facility_id, request.date, &request.time).is_some() {
            return Err(AppError::SlotTaken {
                facility_id: request.facility_id.clone(),
                date: request.date.to_string(),
                time: request.time.clone(),
            });
        }

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            facility_id: request.facility_id.clone(),
            date: request.date,
            time: request.time.clone(),
            client_name: client_name.to_string(),
            client_phone: client_phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            created_at: chrono::Utc::now().naive_utc(),
        };

        // Roll back on a failed save so memory never diverges from the
        // persisted collection.
        self.bookings.push(booking.clone());
        if let Err(e) = self.repo.save(&self.bookings) {
            self.bookings.pop();
            return Err(e.into());
        }
        Ok(booking)
    }

    /// Removes the booking with the given id. Returns it if it existed.
    pub fn remove(&mut self, id: &str) -> Result<Option<Booking>, AppError> {
        let Some(pos) = self.bookings.iter().position(|b| b.id == id) else {
            return Ok(None);
        };
        let removed = self.bookings.remove(pos);
        if let Err(e) = self.repo.save(&self.bookings) {
            self.bookings.insert(pos, removed);
            return Err(e.into());
        }
        Ok(Some(removed))
    }

    pub fn booking_for_slot(
        &self,
        facility_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.occupies(facility_id, date, time))
    }

    pub fn bookings_for_date(&self, date: NaiveDate) -> Vec<Booking> {
        self.bookings.iter().filter(|b| b.date == date).cloned().collect()
    }

    /// Inclusive on both ends.
    pub fn bookings_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.date >= start && b.date <= end)
            .cloned()
            .collect()
    }
}
