use crate::redis_client::RedisClient;

pub mod hotels;

/// Кеш поверх Redis.
///
/// Redis необязателен: без него все методы работают как прямой проход в БД.
#[derive(Clone)]
pub struct CacheService {
    redis: Option<RedisClient>,
}

impl CacheService {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis: Some(redis) }
    }

    pub fn disabled() -> Self {
        Self { redis: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.redis.is_some()
    }
}
