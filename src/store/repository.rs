use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::db::queries;
use crate::models::Booking;

/// Fixed key the whole booking collection is persisted under.
pub const STORAGE_KEY: &str = "gym-bookings";

/// Backing store for the booking collection. The store writes the full
/// collection on every mutation, so implementations only need whole-list
/// load and save.
pub trait BookingRepository: Send {
    fn load(&self) -> anyhow::Result<Vec<Booking>>;
    fn save(&self, bookings: &[Booking]) -> anyhow::Result<()>;
}

/// Persists the collection as one JSON document in the `kv_store` table.
pub struct SqliteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

impl BookingRepository for SqliteRepository {
    fn load(&self) -> anyhow::Result<Vec<Booking>> {
        let conn = self.conn.lock().unwrap();
        let raw = queries::kv_get(&conn, STORAGE_KEY)?;
        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(bookings) => Ok(bookings),
                Err(e) => {
                    // Corrupt persisted data degrades to an empty collection.
                    tracing::warn!(error = %e, "failed to parse persisted bookings, resetting");
                    Ok(Vec::new())
                }
            },
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, bookings: &[Booking]) -> anyhow::Result<()> {
        let json = serde_json::to_string(bookings)?;
        let conn = self.conn.lock().unwrap();
        queries::kv_set(&conn, STORAGE_KEY, &json)
    }
}

impl<R: BookingRepository + Sync + ?Sized> BookingRepository for Arc<R> {
    fn load(&self) -> anyhow::Result<Vec<Booking>> {
        (**self).load()
    }

    fn save(&self, bookings: &[Booking]) -> anyhow::Result<()> {
        (**self).save(bookings)
    }
}

/// Volatile repository for tests.
#[derive(Default)]
pub struct MemoryRepository {
    slot: Mutex<Option<String>>,
}

impl BookingRepository for MemoryRepository {
    fn load(&self) -> anyhow::Result<Vec<Booking>> {
        let slot = self.slot.lock().unwrap();
        match slot.as_deref() {
            Some(json) => Ok(serde_json::from_str(json).unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, bookings: &[Booking]) -> anyhow::Result<()> {
        let json = serde_json::to_string(bookings)?;
        *self.slot.lock().unwrap() = Some(json);
        Ok(())
    }
}
