use async_trait::async_trait;
use sqlx::PgPool;

use super::Error;
use crate::models::{Hotel, HotelWithRooms, RoomOccupancy};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn find_hotels(&self) -> Result<Vec<Hotel>, Error>;

    async fn find_hotel_with_rooms(&self, hotel_id: i32) -> Result<Option<HotelWithRooms>, Error>;
}

#[derive(Clone)]
pub struct PgHotelRepository {
    pool: PgPool,
}

impl PgHotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelRepository for PgHotelRepository {
    async fn find_hotels(&self) -> Result<Vec<Hotel>, Error> {
        let hotels = sqlx::query_as::<_, Hotel>("SELECT id, name, image FROM hotels ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(hotels)
    }

    async fn find_hotel_with_rooms(&self, hotel_id: i32) -> Result<Option<HotelWithRooms>, Error> {
        let Some(hotel) =
            sqlx::query_as::<_, Hotel>("SELECT id, name, image FROM hotels WHERE id = $1")
                .bind(hotel_id)
                .fetch_optional(&self.pool)
                .await?
        else {
            return Ok(None);
        };

        let rooms = sqlx::query_as::<_, RoomOccupancy>(
            r#"
            SELECT r.id, r.name, r.capacity, r.hotel_id, COUNT(b.id) AS booking_count
            FROM rooms r
            LEFT JOIN bookings b ON b.room_id = r.id
            WHERE r.hotel_id = $1
            GROUP BY r.id
            ORDER BY r.id
            "#,
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(HotelWithRooms { hotel, rooms }))
    }
}
