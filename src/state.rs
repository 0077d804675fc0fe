use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::models::BookingEvent;
use crate::store::BookingStore;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub store: Mutex<BookingStore>,
    pub config: AppConfig,
    pub events_tx: broadcast::Sender<BookingEvent>,
}
