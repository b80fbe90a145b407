//! REST API module
//!
//! Axum handlers, the Mason document builder, request validation and the
//! router with Swagger documentation.

pub mod controls;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod mason;
pub mod metrics;
pub mod router;
pub mod validated_json;

use sea_orm::DatabaseConnection;

use crate::application::BookingService;

/// Shared state for all API handlers
#[derive(Clone)]
pub struct ApiState {
    pub db: DatabaseConnection,
    pub bookings: BookingService,
}

impl ApiState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            bookings: BookingService::new(db.clone()),
            db,
        }
    }
}

pub use router::create_api_router;
