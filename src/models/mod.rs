pub mod booking;
pub mod facility;
pub mod slot;
pub mod user;

pub use booking::{Booking, BookingEvent, BookingEventKind, BookingRequest};
pub use facility::Facility;
pub use slot::SlotDefinition;
pub use user::{Session, User};
