pub mod auth;
pub mod availability;
pub mod export;
pub mod recurrence;
