use std::sync::Arc;

use super::eligibility::ensure_eligible_for_room;
use crate::{
    cache::CacheService,
    error::Error,
    models::{Hotel, HotelWithRooms},
    repositories::{EnrollmentRepository, HotelRepository},
};

/// Каталог отелей. Виден только тем, кто может забронировать номер.
#[derive(Clone)]
pub struct HotelService {
    hotels: Arc<dyn HotelRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    cache: CacheService,
}

impl HotelService {
    pub fn new(
        hotels: Arc<dyn HotelRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        cache: CacheService,
    ) -> Self {
        Self {
            hotels,
            enrollments,
            cache,
        }
    }

    // Пустой каталог - тоже NotFound
    pub async fn list_hotels(&self, user_id: i32) -> Result<Vec<Hotel>, Error> {
        ensure_eligible_for_room(self.enrollments.as_ref(), user_id).await?;

        let hotels = self.cache.get_hotels(self.hotels.as_ref()).await?;
        if hotels.is_empty() {
            return Err(Error::NotFound("no hotels"));
        }
        Ok(hotels)
    }

    pub async fn get_hotel_with_rooms(
        &self,
        user_id: i32,
        hotel_id: i32,
    ) -> Result<HotelWithRooms, Error> {
        ensure_eligible_for_room(self.enrollments.as_ref(), user_id).await?;

        self.hotels
            .find_hotel_with_rooms(hotel_id)
            .await?
            .ok_or(Error::NotFound("hotel not found"))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        models::{RoomOccupancy, TicketStatus},
        repositories::{InMemoryStore, MockHotelRepository},
    };

    async fn eligible_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        let enrollment = store.insert_enrollment(10).await.unwrap();
        let ticket_type = store.insert_ticket_type("Presencial", 600, false, true).await;
        store
            .insert_ticket(enrollment.id, ticket_type.id, TicketStatus::Paid)
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn list_hotels_empty_catalogue() {
        let mut hotels = MockHotelRepository::new();
        hotels.expect_find_hotels().returning(|| Ok(vec![]));
        let service = HotelService::new(
            Arc::new(hotels),
            Arc::new(eligible_store().await),
            CacheService::disabled(),
        );

        let result = service.list_hotels(10).await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn list_hotels_ineligible_user() {
        let store = Arc::new(InMemoryStore::new());
        let enrollment = store.insert_enrollment(10).await.unwrap();
        let ticket_type = store.insert_ticket_type("Online", 100, true, false).await;
        store
            .insert_ticket(enrollment.id, ticket_type.id, TicketStatus::Paid)
            .await
            .unwrap();
        let mut hotels = MockHotelRepository::new();
        hotels.expect_find_hotels().never();
        let service = HotelService::new(Arc::new(hotels), store, CacheService::disabled());

        let result = service.list_hotels(10).await;

        assert!(matches!(result, Err(Error::Forbidden(_))));
    }

    #[tokio::test]
    async fn hotel_with_rooms() {
        let store = Arc::new(eligible_store().await);
        let hotel = store.insert_hotel("Driven Resort", "resort.png").await;
        let room = store.insert_room(hotel.id, "101", 2).await;
        let service = HotelService::new(store.clone(), store, CacheService::disabled());

        let result = service.get_hotel_with_rooms(10, hotel.id).await.unwrap();

        assert_eq!(result.hotel, hotel);
        assert_eq!(
            result.rooms,
            vec![RoomOccupancy {
                room,
                booking_count: 0,
            }]
        );
    }

    #[tokio::test]
    async fn hotel_not_found() {
        let store = Arc::new(eligible_store().await);
        let service = HotelService::new(store.clone(), store, CacheService::disabled());

        let result = service.get_hotel_with_rooms(10, 404).await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
