use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use super::Error;
use crate::models::{Booking, BookingWithRoom, Room, RoomWithBookingCount};

/// Результат условной записи брони.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveOutcome {
    Reserved(Booking),
    RoomNotFound,
    RoomFull,
    /// У пользователя уже есть бронь (UNIQUE на bookings.user_id)
    UserAlreadyBooked,
    BookingNotFound,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn get_booking(&self, user_id: i32) -> Result<Option<BookingWithRoom>, Error>;

    async fn get_room_with_booking_count(
        &self,
        room_id: i32,
    ) -> Result<Option<RoomWithBookingCount>, Error>;

    // Вставка только если номер существует и в нём есть место.
    // Проверка и вставка - один атомарный шаг.
    async fn create_booking(&self, user_id: i32, room_id: i32) -> Result<ReserveOutcome, Error>;

    // Перенос брони с тем же правилом вместимости; сама переносимая бронь
    // в целевом номере не считается.
    async fn update_booking(&self, booking_id: i32, room_id: i32)
        -> Result<ReserveOutcome, Error>;
}

#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Блокируем строку номера до конца транзакции: все писатели в один номер
    // выстраиваются в очередь, и подсчёт броней ниже не может устареть.
    async fn lock_room_capacity(
        tx: &mut Transaction<'_, Postgres>,
        room_id: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT capacity FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(room_id)
            .fetch_optional(&mut **tx)
            .await
    }
}

#[derive(sqlx::FromRow)]
struct BookingRoomRow {
    booking_id: i32,
    room_id: i32,
    room_name: String,
    capacity: i32,
    hotel_id: i32,
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn get_booking(&self, user_id: i32) -> Result<Option<BookingWithRoom>, Error> {
        let row: Option<BookingRoomRow> = sqlx::query_as(
            r#"
            SELECT b.id AS booking_id, r.id AS room_id, r.name AS room_name,
                   r.capacity, r.hotel_id
            FROM bookings b
            JOIN rooms r ON r.id = b.room_id
            WHERE b.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| BookingWithRoom {
            id: r.booking_id,
            room: Room {
                id: r.room_id,
                name: r.room_name,
                capacity: r.capacity,
                hotel_id: r.hotel_id,
            },
        }))
    }

    async fn get_room_with_booking_count(
        &self,
        room_id: i32,
    ) -> Result<Option<RoomWithBookingCount>, Error> {
        // Один запрос - номер и счётчик читаются из одного снимка
        let room = sqlx::query_as::<_, RoomWithBookingCount>(
            r#"
            SELECT r.id, r.capacity, COUNT(b.id) AS booking_count
            FROM rooms r
            LEFT JOIN bookings b ON b.room_id = r.id
            WHERE r.id = $1
            GROUP BY r.id
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    async fn create_booking(&self, user_id: i32, room_id: i32) -> Result<ReserveOutcome, Error> {
        let mut tx = self.pool.begin().await?;

        let Some(capacity) = Self::lock_room_capacity(&mut tx, room_id).await? else {
            return Ok(ReserveOutcome::RoomNotFound);
        };

        let booking_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE room_id = $1")
                .bind(room_id)
                .fetch_one(&mut *tx)
                .await?;

        if booking_count >= i64::from(capacity) {
            debug!(room_id, booking_count, capacity, "room is full, rolling back");
            return Ok(ReserveOutcome::RoomFull);
        }

        let inserted = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (user_id, room_id)
             VALUES ($1, $2)
             RETURNING id, user_id, room_id",
        )
        .bind(user_id)
        .bind(room_id)
        .fetch_one(&mut *tx)
        .await;

        let booking = match inserted {
            Ok(booking) => booking,
            Err(err) => {
                return match Error::from_insert(err, "bookings_user_id_key") {
                    Error::UniqueViolation(_) => Ok(ReserveOutcome::UserAlreadyBooked),
                    other => Err(other),
                };
            }
        };

        tx.commit().await?;
        Ok(ReserveOutcome::Reserved(booking))
    }

    async fn update_booking(
        &self,
        booking_id: i32,
        room_id: i32,
    ) -> Result<ReserveOutcome, Error> {
        let mut tx = self.pool.begin().await?;

        let Some(capacity) = Self::lock_room_capacity(&mut tx, room_id).await? else {
            return Ok(ReserveOutcome::RoomNotFound);
        };

        let booking_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE room_id = $1 AND id <> $2",
        )
        .bind(room_id)
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

        if booking_count >= i64::from(capacity) {
            debug!(room_id, booking_count, capacity, "target room is full, rolling back");
            return Ok(ReserveOutcome::RoomFull);
        }

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET room_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING id, user_id, room_id",
        )
        .bind(booking_id)
        .bind(room_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(booking) = updated else {
            return Ok(ReserveOutcome::BookingNotFound);
        };

        tx.commit().await?;
        Ok(ReserveOutcome::Reserved(booking))
    }
}
