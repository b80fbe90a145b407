//! Business logic and use cases.

pub mod bookings;

pub use bookings::BookingService;
