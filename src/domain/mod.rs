//! Core business types and the room-availability logic.

pub mod availability;
pub mod types;

pub use availability::{booked_nights, InvalidStay, Stay};
pub use types::{PaymentMethod, RoomType};
