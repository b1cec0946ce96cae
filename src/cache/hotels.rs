use crate::cache::CacheService;
use crate::models::Hotel;
use crate::repositories::{self, HotelRepository};
use redis::AsyncCommands;
use tracing::warn;

const HOTELS_KEY: &str = "hotels";
const HOTELS_TTL_SECONDS: u64 = 3600;

impl CacheService {
    // Получить список отелей: сначала кеш, потом БД
    pub async fn get_hotels(
        &self,
        repository: &dyn HotelRepository,
    ) -> Result<Vec<Hotel>, repositories::Error> {
        if let Ok(Some(hotels)) = self.get_hotels_from_cache().await {
            return Ok(hotels);
        }

        let hotels = repository.find_hotels().await?;
        if let Err(e) = self.save_hotels_to_cache(&hotels).await {
            warn!("Failed to cache hotels: {:?}", e);
        }
        Ok(hotels)
    }

    // === Работа с кешем ===
    async fn get_hotels_from_cache(&self) -> Result<Option<Vec<Hotel>>, redis::RedisError> {
        let Some(redis) = &self.redis else {
            return Ok(None);
        };
        let mut conn = redis.conn.clone();
        let data: Option<String> = conn.get(HOTELS_KEY).await?;
        let Some(data) = data else {
            return Ok(None);
        };
        let hotels: Vec<Hotel> = serde_json::from_str(&data).map_err(|_| {
            redis::RedisError::from((redis::ErrorKind::TypeError, "Parse error"))
        })?;
        Ok(Some(hotels))
    }

    async fn save_hotels_to_cache(&self, hotels: &[Hotel]) -> Result<(), redis::RedisError> {
        // Пустой каталог не кешируем, чтобы новые отели появились сразу
        let Some(redis) = self.redis.as_ref().filter(|_| !hotels.is_empty()) else {
            return Ok(());
        };
        let data = serde_json::to_string(hotels).map_err(|_| {
            redis::RedisError::from((redis::ErrorKind::TypeError, "Serialize error"))
        })?;
        let mut conn = redis.conn.clone();
        conn.set_ex(HOTELS_KEY, data, HOTELS_TTL_SECONDS).await
    }
}
