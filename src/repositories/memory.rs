//! Хранилище в памяти.
//!
//! Реализует те же контракты, что и Postgres-репозитории. Всё состояние под
//! одним мьютексом: проверка вместимости и запись брони выполняются, пока он
//! захвачен, поэтому гонка check-then-insert здесь невозможна.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::Mutex;

use super::{
    BookingRepository, EnrollmentRepository, Error, HotelRepository, ReserveOutcome,
    SessionRepository,
};
use crate::models::{
    Booking, BookingWithRoom, Enrollment, EnrollmentWithTicket, Hotel, HotelWithRooms, Room,
    RoomOccupancy, RoomWithBookingCount, Ticket, TicketStatus, TicketType,
};

#[derive(Default)]
struct State {
    enrollments: BTreeMap<i32, Enrollment>,
    tickets: BTreeMap<i32, Ticket>,
    ticket_types: BTreeMap<i32, TicketType>,
    hotels: BTreeMap<i32, Hotel>,
    rooms: BTreeMap<i32, Room>,
    bookings: BTreeMap<i32, Booking>,
    sessions: HashSet<(i32, String)>,
    last_id: i32,
}

impl State {
    // Общая последовательность на все таблицы, как SERIAL в одной схеме
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn booking_count(&self, room_id: i32, exclude: Option<i32>) -> i64 {
        self.bookings
            .values()
            .filter(|b| b.room_id == room_id && Some(b.id) != exclude)
            .count() as i64
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Всего броней в номере, для проверок в тестах
    pub async fn bookings_in_room(&self, room_id: i32) -> i64 {
        self.state.lock().await.booking_count(room_id, None)
    }

    pub async fn insert_enrollment(&self, user_id: i32) -> Result<Enrollment, Error> {
        let mut state = self.state.lock().await;
        if state.enrollments.values().any(|e| e.user_id == user_id) {
            return Err(Error::UniqueViolation("enrollments_user_id_key"));
        }

        let enrollment = Enrollment {
            id: state.next_id(),
            user_id,
        };
        state.enrollments.insert(enrollment.id, enrollment.clone());
        Ok(enrollment)
    }

    pub async fn insert_ticket_type(
        &self,
        name: &str,
        price: i32,
        is_remote: bool,
        includes_hotel: bool,
    ) -> TicketType {
        let mut state = self.state.lock().await;
        let ticket_type = TicketType {
            id: state.next_id(),
            name: name.to_string(),
            price,
            is_remote,
            includes_hotel,
        };
        state.ticket_types.insert(ticket_type.id, ticket_type.clone());
        ticket_type
    }

    pub async fn insert_ticket(
        &self,
        enrollment_id: i32,
        ticket_type_id: i32,
        status: TicketStatus,
    ) -> Result<Ticket, Error> {
        let mut state = self.state.lock().await;
        if state.tickets.values().any(|t| t.enrollment_id == enrollment_id) {
            return Err(Error::UniqueViolation("tickets_enrollment_id_key"));
        }

        let ticket = Ticket {
            id: state.next_id(),
            enrollment_id,
            ticket_type_id,
            status,
        };
        state.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    pub async fn insert_hotel(&self, name: &str, image: &str) -> Hotel {
        let mut state = self.state.lock().await;
        let hotel = Hotel {
            id: state.next_id(),
            name: name.to_string(),
            image: image.to_string(),
        };
        state.hotels.insert(hotel.id, hotel.clone());
        hotel
    }

    pub async fn insert_room(&self, hotel_id: i32, name: &str, capacity: i32) -> Room {
        let mut state = self.state.lock().await;
        let room = Room {
            id: state.next_id(),
            name: name.to_string(),
            capacity,
            hotel_id,
        };
        state.rooms.insert(room.id, room.clone());
        room
    }

    pub async fn insert_session(&self, user_id: i32, token: &str) {
        self.state
            .lock()
            .await
            .sessions
            .insert((user_id, token.to_string()));
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn get_booking(&self, user_id: i32) -> Result<Option<BookingWithRoom>, Error> {
        let state = self.state.lock().await;
        let Some(booking) = state.bookings.values().find(|b| b.user_id == user_id) else {
            return Ok(None);
        };

        let room = state
            .rooms
            .get(&booking.room_id)
            .cloned()
            .ok_or(Error::Corrupted("booking references missing room"))?;

        Ok(Some(BookingWithRoom {
            id: booking.id,
            room,
        }))
    }

    async fn get_room_with_booking_count(
        &self,
        room_id: i32,
    ) -> Result<Option<RoomWithBookingCount>, Error> {
        let state = self.state.lock().await;
        Ok(state.rooms.get(&room_id).map(|room| RoomWithBookingCount {
            id: room.id,
            capacity: room.capacity,
            booking_count: state.booking_count(room.id, None),
        }))
    }

    async fn create_booking(&self, user_id: i32, room_id: i32) -> Result<ReserveOutcome, Error> {
        let mut state = self.state.lock().await;
        let Some(capacity) = state.rooms.get(&room_id).map(|r| r.capacity) else {
            return Ok(ReserveOutcome::RoomNotFound);
        };
        if state.booking_count(room_id, None) >= i64::from(capacity) {
            return Ok(ReserveOutcome::RoomFull);
        }
        if state.bookings.values().any(|b| b.user_id == user_id) {
            return Ok(ReserveOutcome::UserAlreadyBooked);
        }

        let booking = Booking {
            id: state.next_id(),
            user_id,
            room_id,
        };
        state.bookings.insert(booking.id, booking.clone());
        Ok(ReserveOutcome::Reserved(booking))
    }

    async fn update_booking(
        &self,
        booking_id: i32,
        room_id: i32,
    ) -> Result<ReserveOutcome, Error> {
        let mut state = self.state.lock().await;
        let Some(capacity) = state.rooms.get(&room_id).map(|r| r.capacity) else {
            return Ok(ReserveOutcome::RoomNotFound);
        };
        if state.booking_count(room_id, Some(booking_id)) >= i64::from(capacity) {
            return Ok(ReserveOutcome::RoomFull);
        }

        match state.bookings.get_mut(&booking_id) {
            Some(booking) => {
                booking.room_id = room_id;
                Ok(ReserveOutcome::Reserved(booking.clone()))
            }
            None => Ok(ReserveOutcome::BookingNotFound),
        }
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn find_enrollment_and_ticket_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<EnrollmentWithTicket>, Error> {
        let state = self.state.lock().await;
        Ok(state
            .enrollments
            .values()
            .find(|e| e.user_id == user_id)
            .map(|enrollment| EnrollmentWithTicket {
                id: enrollment.id,
                ticket: state
                    .tickets
                    .values()
                    .find(|t| t.enrollment_id == enrollment.id)
                    .cloned(),
            }))
    }

    async fn get_ticket_type(&self, ticket_type_id: i32) -> Result<Option<TicketType>, Error> {
        Ok(self
            .state
            .lock()
            .await
            .ticket_types
            .get(&ticket_type_id)
            .cloned())
    }
}

#[async_trait]
impl HotelRepository for InMemoryStore {
    async fn find_hotels(&self) -> Result<Vec<Hotel>, Error> {
        Ok(self.state.lock().await.hotels.values().cloned().collect())
    }

    async fn find_hotel_with_rooms(&self, hotel_id: i32) -> Result<Option<HotelWithRooms>, Error> {
        let state = self.state.lock().await;
        let Some(hotel) = state.hotels.get(&hotel_id).cloned() else {
            return Ok(None);
        };

        let rooms = state
            .rooms
            .values()
            .filter(|r| r.hotel_id == hotel_id)
            .map(|room| RoomOccupancy {
                booking_count: state.booking_count(room.id, None),
                room: room.clone(),
            })
            .collect();

        Ok(Some(HotelWithRooms { hotel, rooms }))
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn has_session(&self, user_id: i32, token: &str) -> Result<bool, Error> {
        Ok(self
            .state
            .lock()
            .await
            .sessions
            .contains(&(user_id, token.to_string())))
    }
}
