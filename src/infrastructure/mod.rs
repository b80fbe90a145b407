//! External concerns: database access, schema migrations, seed data.

pub mod database;

pub use database::{init_database, DatabaseConfig};
