//! API Handlers

pub mod api_keys;
pub mod bookings;
pub mod customers;
pub mod entry;
pub mod health;
pub mod rooms;
