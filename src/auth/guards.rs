//! Affiliation checks run after API-key authentication.
//!
//! The key digest match only proves the caller is *an* admin; these guards
//! prove the admin may touch the specific hotel, booking or customer the
//! request targets.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::middleware::AdminIdentity;
use crate::api::error::ApiError;
use crate::infrastructure::database::entities::{booking, hotel, room};

const UNAUTHORIZED_ADMIN: &str = "Admin is unauthorized!";

fn unauthorized() -> ApiError {
    ApiError::Forbidden(UNAUTHORIZED_ADMIN.to_string())
}

/// New and modified bookings: the hotel named in the request body must be
/// the admin's own hotel. Returns that hotel so callers skip a second
/// lookup.
pub async fn ensure_hotel_admin(
    db: &DatabaseConnection,
    admin: &AdminIdentity,
    hotel_name: &str,
) -> Result<hotel::Model, ApiError> {
    let Some(hotel_id) = admin.hotel_id else {
        return Err(unauthorized());
    };

    let own_hotel = hotel::Entity::find_by_id(hotel_id)
        .one(db)
        .await?
        .ok_or_else(unauthorized)?;

    if own_hotel.name == hotel_name {
        Ok(own_hotel)
    } else {
        Err(unauthorized())
    }
}

/// Existing bookings: the admin must belong to the hotel owning the booked
/// room.
pub async fn ensure_booking_admin(
    db: &DatabaseConnection,
    admin: &AdminIdentity,
    target: &booking::Model,
) -> Result<(), ApiError> {
    let Some(room_id) = target.room_id else {
        return Err(unauthorized());
    };

    let booked_room = room::Entity::find_by_id(room_id)
        .one(db)
        .await?
        .ok_or_else(unauthorized)?;

    match (admin.hotel_id, booked_room.hotel_id) {
        (Some(a), Some(h)) if a == h => Ok(()),
        _ => Err(unauthorized()),
    }
}

/// Customer records: the customer must have at least one booking in the
/// admin's hotel.
pub async fn ensure_customer_admin(
    db: &DatabaseConnection,
    admin: &AdminIdentity,
    customer_id: i32,
) -> Result<(), ApiError> {
    let Some(admin_hotel) = admin.hotel_id else {
        return Err(unauthorized());
    };

    let rows = booking::Entity::find()
        .filter(booking::Column::CustomerId.eq(customer_id))
        .find_also_related(room::Entity)
        .all(db)
        .await?;

    let affiliated = rows
        .into_iter()
        .filter_map(|(_, booked_room)| booked_room)
        .any(|r| r.hotel_id == Some(admin_hotel));

    if affiliated {
        Ok(())
    } else {
        Err(unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use chrono::NaiveDate;
    use sea_orm::{ActiveModelTrait, Database, Set};
    use sea_orm_migration::MigratorTrait;

    fn identity(hotel_id: Option<i32>) -> AdminIdentity {
        AdminIdentity {
            id: 1,
            username: "admin".to_string(),
            hotel_id,
        }
    }

    async fn setup() -> (DatabaseConnection, hotel::Model, room::Model, booking::Model) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let guest = crate::infrastructure::database::entities::customer::ActiveModel {
            name: Set("Maija Meikäläinen".to_string()),
            phone: Set("+358401234567".to_string()),
            mail: Set("maija@example.com".to_string()),
            address: Set("Yliopistokatu 1".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let own_hotel = hotel::ActiveModel {
            name: Set("Hotel Aurora".to_string()),
            country: Set("Finland".to_string()),
            city: Set("Oulu".to_string()),
            street: Set("Kirkkokatu 3".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let own_room = room::ActiveModel {
            hotel_id: Set(Some(own_hotel.id)),
            number: Set(101),
            room_type: Set("single".to_string()),
            price: Set(80.0),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let stored_booking = booking::ActiveModel {
            room_id: Set(Some(own_room.id)),
            customer_id: Set(Some(guest.id)),
            check_in: Set(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
            check_out: Set(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
            payment: Set("cash".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        (db, own_hotel, own_room, stored_booking)
    }

    #[tokio::test]
    async fn hotel_admin_requires_matching_hotel_name() {
        let (db, own_hotel, _, _) = setup().await;

        let ok = ensure_hotel_admin(&db, &identity(Some(own_hotel.id)), "Hotel Aurora").await;
        assert_eq!(ok.unwrap().id, own_hotel.id);

        assert!(
            ensure_hotel_admin(&db, &identity(Some(own_hotel.id)), "Hotel Borealis")
                .await
                .is_err()
        );
        assert!(ensure_hotel_admin(&db, &identity(None), "Hotel Aurora")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn booking_admin_follows_the_room_to_its_hotel() {
        let (db, own_hotel, _, stored_booking) = setup().await;

        assert!(
            ensure_booking_admin(&db, &identity(Some(own_hotel.id)), &stored_booking)
                .await
                .is_ok()
        );
        assert!(
            ensure_booking_admin(&db, &identity(Some(own_hotel.id + 1)), &stored_booking)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn customer_admin_requires_a_booking_in_the_admins_hotel() {
        let (db, own_hotel, _, stored_booking) = setup().await;
        let customer_id = stored_booking.customer_id.unwrap();

        assert!(
            ensure_customer_admin(&db, &identity(Some(own_hotel.id)), customer_id)
                .await
                .is_ok()
        );
        // customer without bookings
        assert!(ensure_customer_admin(&db, &identity(Some(own_hotel.id)), 42)
            .await
            .is_err());
        // admin of another hotel
        assert!(
            ensure_customer_admin(&db, &identity(Some(own_hotel.id + 1)), customer_id)
                .await
                .is_err()
        );
    }
}
