//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_hotels;
mod m20240301_000002_create_rooms;
mod m20240301_000003_create_customers;
mod m20240301_000004_create_admins;
mod m20240301_000005_create_api_keys;
mod m20240301_000006_create_bookings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_hotels::Migration),
            Box::new(m20240301_000002_create_rooms::Migration),
            Box::new(m20240301_000003_create_customers::Migration),
            Box::new(m20240301_000004_create_admins::Migration),
            Box::new(m20240301_000005_create_api_keys::Migration),
            Box::new(m20240301_000006_create_bookings::Migration),
        ]
    }
}
