pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/app", get(handlers::dashboard::app_page))
        .route("/", get(handlers::dashboard::redirect_to_app))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/facilities", get(handlers::dashboard::get_facilities))
        .route("/api/grid", get(handlers::dashboard::get_grid))
        .route("/api/bookings", get(handlers::bookings::get_bookings))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route(
            "/api/bookings/preview",
            post(handlers::bookings::preview_booking),
        )
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::bookings::cancel_booking),
        )
        .route("/api/export", get(handlers::export::export_bookings))
        .route("/api/events", get(handlers::events::events_stream))
        .with_state(state)
}
