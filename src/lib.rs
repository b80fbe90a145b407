//! # Hotel Booking Assistant API
//!
//! REST service for hotel administrators: customers, bookings and room
//! availability, with Mason hypermedia responses and API-key auth.
//!
//! ## Architecture
//!
//! - **domain**: availability logic and core types
//! - **application**: booking placement and availability search
//! - **auth**: API-key issuance, header middleware, affiliation guards
//! - **infrastructure**: database connection, entities, migrations, seed
//! - **api**: Axum handlers, Mason documents, router with Swagger docs
//! - **support**: graceful shutdown plumbing

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use api::create_api_router;
