//! First-boot dataset loading.
//!
//! Reads a JSON file describing hotels (with nested rooms, bookings and
//! admins) plus customers, and inserts everything when the database is
//! still empty. Customers list the booking references that belong to them;
//! a booking whose reference no customer claims is skipped.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::password::hash_password;

use super::entities::{admin, booking, customer, hotel, room};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

#[derive(Debug, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub hotels: Vec<SeedHotel>,
    #[serde(default)]
    pub customers: Vec<SeedCustomer>,
}

#[derive(Debug, Deserialize)]
pub struct SeedHotel {
    pub name: String,
    pub country: String,
    pub city: String,
    pub street: String,
    #[serde(default)]
    pub rooms: Vec<SeedRoom>,
    #[serde(default)]
    pub admins: Vec<SeedAdmin>,
}

#[derive(Debug, Deserialize)]
pub struct SeedRoom {
    pub number: i32,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price: f64,
    #[serde(default)]
    pub bookings: Vec<SeedBooking>,
}

#[derive(Debug, Deserialize)]
pub struct SeedBooking {
    pub booking_ref: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub payment: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedAdmin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedCustomer {
    pub name: String,
    pub phone: String,
    pub mail: String,
    pub address: String,
    /// Booking references owned by this customer
    #[serde(default)]
    pub bookings: Vec<i32>,
}

/// Load the dataset from `path` unless the database already has hotels.
pub async fn seed_from_file(db: &DatabaseConnection, path: &Path) -> Result<(), SeedError> {
    let hotels = hotel::Entity::find().count(db).await?;
    if hotels > 0 {
        info!("Database already populated, skipping seed file");
        return Ok(());
    }

    info!("Loading seed data from {}", path.display());
    let data: SeedData = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    apply(db, data).await
}

async fn apply(db: &DatabaseConnection, data: SeedData) -> Result<(), SeedError> {
    // Insert customers first and remember which booking ref belongs to whom.
    let mut customer_by_ref: HashMap<i32, i32> = HashMap::new();
    for seed in &data.customers {
        let inserted = customer::ActiveModel {
            name: Set(seed.name.clone()),
            phone: Set(seed.phone.clone()),
            mail: Set(seed.mail.clone()),
            address: Set(seed.address.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for booking_ref in &seed.bookings {
            customer_by_ref.insert(*booking_ref, inserted.id);
        }
    }

    let mut bookings = 0usize;
    for seed_hotel in data.hotels {
        let inserted_hotel = hotel::ActiveModel {
            name: Set(seed_hotel.name),
            country: Set(seed_hotel.country),
            city: Set(seed_hotel.city),
            street: Set(seed_hotel.street),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for seed_admin in seed_hotel.admins {
            admin::ActiveModel {
                hotel_id: Set(Some(inserted_hotel.id)),
                username: Set(seed_admin.username),
                password_hash: Set(hash_password(&seed_admin.password)?),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        for seed_room in seed_hotel.rooms {
            let inserted_room = room::ActiveModel {
                hotel_id: Set(Some(inserted_hotel.id)),
                number: Set(seed_room.number),
                room_type: Set(seed_room.room_type),
                price: Set(seed_room.price),
                ..Default::default()
            }
            .insert(db)
            .await?;

            for seed_booking in seed_room.bookings {
                let Some(customer_id) = customer_by_ref.get(&seed_booking.booking_ref) else {
                    warn!(
                        booking_ref = seed_booking.booking_ref,
                        "No customer claims this booking ref, booking is not added"
                    );
                    continue;
                };

                booking::ActiveModel {
                    booking_ref: Set(seed_booking.booking_ref),
                    room_id: Set(Some(inserted_room.id)),
                    customer_id: Set(Some(*customer_id)),
                    check_in: Set(seed_booking.check_in),
                    check_out: Set(seed_booking.check_out),
                    payment: Set(seed_booking.payment),
                }
                .insert(db)
                .await?;
                bookings += 1;
            }
        }
    }

    info!(
        customers = data.customers.len(),
        bookings, "Seed data loaded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use sea_orm::{ColumnTrait, Database, QueryFilter};
    use sea_orm_migration::MigratorTrait;

    const DATASET: &str = r#"{
        "hotels": [
            {
                "name": "Hotel Aurora",
                "country": "Finland",
                "city": "Oulu",
                "street": "Kirkkokatu 3",
                "rooms": [
                    {
                        "number": 101,
                        "type": "single",
                        "price": 84.5,
                        "bookings": [
                            {
                                "booking_ref": 1001,
                                "check_in": "2024-06-01",
                                "check_out": "2024-06-04",
                                "payment": "credit"
                            },
                            {
                                "booking_ref": 9999,
                                "check_in": "2024-07-01",
                                "check_out": "2024-07-02",
                                "payment": "cash"
                            }
                        ]
                    }
                ],
                "admins": [
                    {"username": "aurora-admin", "password": "hunter2"}
                ]
            }
        ],
        "customers": [
            {
                "name": "Maija Meikäläinen",
                "phone": "+358401234567",
                "mail": "maija@example.com",
                "address": "Yliopistokatu 1",
                "bookings": [1001]
            }
        ]
    }"#;

    #[tokio::test]
    async fn unclaimed_bookings_are_skipped() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let data: SeedData = serde_json::from_str(DATASET).unwrap();
        apply(&db, data).await.unwrap();

        assert_eq!(hotel::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(booking::Entity::find().count(&db).await.unwrap(), 1);
        assert!(booking::Entity::find_by_id(1001)
            .one(&db)
            .await
            .unwrap()
            .is_some());

        let stored_admin = admin::Entity::find()
            .filter(admin::Column::Username.eq("aurora-admin"))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!(crate::auth::password::verify_password("hunter2", &stored_admin.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let path = std::env::temp_dir().join(format!("seed-{}.json", std::process::id()));
        std::fs::write(&path, DATASET).unwrap();

        seed_from_file(&db, &path).await.unwrap();
        seed_from_file(&db, &path).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(hotel::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(customer::Entity::find().count(&db).await.unwrap(), 1);
    }
}
