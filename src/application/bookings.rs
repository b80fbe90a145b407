//! Room selection for bookings and availability searches.
//!
//! The conflict scan always runs against the persisted bookings of each
//! candidate room: a room qualifies only when none of its booked nights
//! intersect the requested stay.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use crate::domain::availability::{booked_nights, Stay};
use crate::infrastructure::database::entities::{booking, hotel, room};

#[derive(Clone)]
pub struct BookingService {
    db: DatabaseConnection,
}

impl BookingService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Rooms of the given type in a hotel, in id order.
    pub async fn rooms_of_type(
        &self,
        hotel_id: i32,
        room_type: &str,
    ) -> Result<Vec<room::Model>, DbErr> {
        room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .filter(room::Column::RoomType.eq(room_type))
            .order_by_asc(room::Column::Id)
            .all(&self.db)
            .await
    }

    /// Whether the room is free for every requested night.
    pub async fn is_room_free(&self, room_id: i32, stay: &Stay) -> Result<bool, DbErr> {
        let bookings = booking::Entity::find()
            .filter(booking::Column::RoomId.eq(room_id))
            .all(&self.db)
            .await?;

        let booked = booked_nights(bookings.iter().map(|b| (b.check_in, b.check_out)));
        Ok(!stay.conflicts_with(&booked))
    }

    /// First free room among `rooms`, preserving their order.
    pub async fn first_free(
        &self,
        rooms: &[room::Model],
        stay: &Stay,
    ) -> Result<Option<room::Model>, DbErr> {
        for candidate in rooms {
            if self.is_room_free(candidate.id, stay).await? {
                debug!(room_id = candidate.id, "Room is free for the requested stay");
                return Ok(Some(candidate.clone()));
            }
        }
        Ok(None)
    }

    /// Free rooms of the given type across every hotel in a location,
    /// paired with their hotel for response rendering.
    pub async fn available_rooms(
        &self,
        country: &str,
        city: &str,
        room_type: &str,
        stay: &Stay,
    ) -> Result<Vec<(hotel::Model, room::Model)>, DbErr> {
        let hotels = hotel::Entity::find()
            .filter(hotel::Column::Country.eq(country))
            .filter(hotel::Column::City.eq(city))
            .all(&self.db)
            .await?;

        let mut found = Vec::new();
        for candidate_hotel in hotels {
            for candidate_room in self.rooms_of_type(candidate_hotel.id, room_type).await? {
                if self.is_room_free(candidate_room.id, stay).await? {
                    found.push((candidate_hotel.clone(), candidate_room));
                }
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use chrono::NaiveDate;
    use sea_orm::{ActiveModelTrait, Database, Set};
    use sea_orm_migration::MigratorTrait;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> (DatabaseConnection, i32, i32, i32) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let stay_hotel = hotel::ActiveModel {
            name: Set("Hotel Aurora".to_string()),
            country: Set("Finland".to_string()),
            city: Set("Oulu".to_string()),
            street: Set("Kirkkokatu 3".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let first = room::ActiveModel {
            hotel_id: Set(Some(stay_hotel.id)),
            number: Set(101),
            room_type: Set("double".to_string()),
            price: Set(120.0),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let second = room::ActiveModel {
            hotel_id: Set(Some(stay_hotel.id)),
            number: Set(102),
            room_type: Set("double".to_string()),
            price: Set(120.0),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        // first room is taken for June 10-13
        booking::ActiveModel {
            room_id: Set(Some(first.id)),
            customer_id: Set(None),
            check_in: Set(date(2024, 6, 10)),
            check_out: Set(date(2024, 6, 13)),
            payment: Set("cash".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        (db, stay_hotel.id, first.id, second.id)
    }

    #[tokio::test]
    async fn overlapping_stay_falls_through_to_the_next_room() {
        let (db, hotel_id, first_id, second_id) = setup().await;
        let service = BookingService::new(db);

        let stay = Stay::new(date(2024, 6, 11), date(2024, 6, 14)).unwrap();
        let rooms = service.rooms_of_type(hotel_id, "double").await.unwrap();
        assert_eq!(rooms.len(), 2);

        let free = service.first_free(&rooms, &stay).await.unwrap().unwrap();
        assert_eq!(free.id, second_id);
        assert_ne!(free.id, first_id);
    }

    #[tokio::test]
    async fn non_overlapping_stay_takes_the_first_room() {
        let (db, hotel_id, first_id, _) = setup().await;
        let service = BookingService::new(db);

        let stay = Stay::new(date(2024, 6, 13), date(2024, 6, 15)).unwrap();
        let rooms = service.rooms_of_type(hotel_id, "double").await.unwrap();
        let free = service.first_free(&rooms, &stay).await.unwrap().unwrap();
        assert_eq!(free.id, first_id);
    }

    #[tokio::test]
    async fn unknown_room_type_yields_no_candidates() {
        let (db, hotel_id, _, _) = setup().await;
        let service = BookingService::new(db);

        let rooms = service.rooms_of_type(hotel_id, "suite").await.unwrap();
        assert!(rooms.is_empty());
    }

    #[tokio::test]
    async fn availability_search_reports_only_free_rooms() {
        let (db, _, _, second_id) = setup().await;
        let service = BookingService::new(db);

        let stay = Stay::new(date(2024, 6, 10), date(2024, 6, 12)).unwrap();
        let found = service
            .available_rooms("Finland", "Oulu", "double", &stay)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1.id, second_id);
        assert_eq!(found[0].0.name, "Hotel Aurora");

        let nothing = service
            .available_rooms("Finland", "Helsinki", "double", &stay)
            .await
            .unwrap();
        assert!(nothing.is_empty());
    }
}
