pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod redis_client;
pub mod repositories;
pub mod services;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    cache::CacheService,
    repositories::{Repositories, SessionRepository},
    services::{BookingService, HotelService},
};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub bookings: BookingService,
    pub hotels: HotelService,
    pub sessions: Arc<dyn SessionRepository>,
}

impl AppState {
    /// Подключается к Postgres (и к Redis, если задан), прогоняет миграции.
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::connect(&config.database).await?;
        info!("Database connected");

        db.run_migrations().await?;

        let cache = match &config.redis.url {
            Some(url) => match redis_client::RedisClient::connect(url).await {
                Ok(redis) => {
                    info!("Redis connected");
                    CacheService::new(redis)
                }
                Err(e) => {
                    warn!("Redis unavailable, hotels cache disabled: {:?}", e);
                    CacheService::disabled()
                }
            },
            None => CacheService::disabled(),
        };

        Ok(Self::from_repositories(config, db.repositories(), cache))
    }

    pub fn from_repositories(
        config: config::Config,
        repositories: Repositories,
        cache: CacheService,
    ) -> Arc<Self> {
        info!(cache_enabled = cache.is_enabled(), "Building application state");

        Arc::new(Self {
            bookings: BookingService::new(
                repositories.bookings,
                repositories.enrollments.clone(),
            ),
            hotels: HotelService::new(repositories.hotels, repositories.enrollments, cache),
            sessions: repositories.sessions,
            config,
        })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Conference Booking API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
