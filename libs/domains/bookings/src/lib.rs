//! Bookings domain: the booking state machine and the state-filtered
//! listings for bookers and item owners. The repository implementations
//! also serve the items domain's `BookingHistory` port.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BookingError, BookingResult};
pub use models::{
    Booking, BookingResponse, BookingState, BookingStatus, CreateBooking, NewBooking,
};
pub use postgres::PgBookingRepository;
pub use repository::{BookingRepository, InMemoryBookingRepository};
pub use service::BookingService;
