use std::sync::Arc;
use tracing::{info, warn};

use super::eligibility::ensure_eligible_for_room;
use crate::{
    error::Error,
    models::{Booking, BookingWithRoom},
    repositories::{BookingRepository, EnrollmentRepository, ReserveOutcome},
};

/// Бронирование номеров в отелях конференции.
///
/// Сервис не хранит состояния между вызовами: всё состояние в репозиториях,
/// атомарность проверки вместимости обеспечивает `BookingRepository`.
#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            bookings,
            enrollments,
        }
    }

    pub async fn ensure_eligible_for_room(&self, user_id: i32) -> Result<(), Error> {
        ensure_eligible_for_room(self.enrollments.as_ref(), user_id).await
    }

    // Текущая бронь пользователя вместе с номером
    pub async fn get_booking(&self, user_id: i32) -> Result<BookingWithRoom, Error> {
        self.bookings
            .get_booking(user_id)
            .await?
            .ok_or(Error::NotFound("booking not found"))
    }

    // NotFound - нет регистрации, билета, типа билета или номера.
    // Forbidden - билет без проживания, бронь уже есть или номер заполнен.
    pub async fn create_booking(&self, user_id: i32, room_id: i32) -> Result<i32, Error> {
        self.ensure_eligible_for_room(user_id).await?;

        if self.bookings.get_booking(user_id).await?.is_some() {
            return Err(Error::Forbidden("user already has a booking"));
        }

        self.ensure_room_vacant(room_id).await?;

        let outcome = self.bookings.create_booking(user_id, room_id).await?;
        let booking = Self::reserved_booking(outcome, room_id)?;

        info!(booking_id = booking.id, user_id, room_id, "created booking");
        Ok(booking.id)
    }

    // Переносит свою бронь `booking_id` в номер `room_id`.
    // Чужая бронь или отсутствие брони - Forbidden.
    pub async fn update_booking(
        &self,
        user_id: i32,
        room_id: i32,
        booking_id: i32,
    ) -> Result<i32, Error> {
        let current = self
            .bookings
            .get_booking(user_id)
            .await?
            .ok_or(Error::Forbidden("user has no booking"))?;

        if current.id != booking_id {
            warn!(user_id, booking_id, "attempt to update someone else's booking");
            return Err(Error::Forbidden("booking does not belong to user"));
        }

        // В свой же номер переезжать можно, даже если он заполнен
        if current.room.id != room_id {
            self.ensure_room_vacant(room_id).await?;
        }

        let outcome = self.bookings.update_booking(booking_id, room_id).await?;
        let booking = Self::reserved_booking(outcome, room_id)?;

        info!(booking_id = booking.id, user_id, room_id, "updated booking");
        Ok(booking.id)
    }

    async fn ensure_room_vacant(&self, room_id: i32) -> Result<(), Error> {
        let room = self
            .bookings
            .get_room_with_booking_count(room_id)
            .await?
            .ok_or(Error::NotFound("room not found"))?;

        if room.is_full() {
            return Err(Error::Forbidden("room is full"));
        }

        Ok(())
    }

    // Отказ условной записи после успешной предварительной проверки означает,
    // что между чтением и записью номер успели занять (или удалить).
    fn reserved_booking(outcome: ReserveOutcome, room_id: i32) -> Result<Booking, Error> {
        match outcome {
            ReserveOutcome::Reserved(booking) => Ok(booking),
            ReserveOutcome::RoomNotFound => Err(Error::NotFound("room not found")),
            ReserveOutcome::RoomFull => {
                info!(room_id, "room filled up concurrently");
                Err(Error::Forbidden("room is full"))
            }
            ReserveOutcome::UserAlreadyBooked => {
                Err(Error::Forbidden("user already has a booking"))
            }
            ReserveOutcome::BookingNotFound => Err(Error::Forbidden("user has no booking")),
        }
    }
}
