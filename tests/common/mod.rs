#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use conference_booking::{
    app,
    cache::CacheService,
    config::{AppConfig, Config, DatabaseConfig, JwtConfig, RedisConfig},
    middleware::JwtClaims,
    models::{Hotel, Room, TicketStatus},
    repositories::{InMemoryStore, Repositories},
    services::BookingService,
    AppState,
};
use fake::{
    faker::{address::en::CityName, company::en::CompanyName},
    Fake,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "conference-booking-test-secret";

pub fn config() -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            rust_log: "conference_booking=debug".to_string(),
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            pool_size: 1,
        },
        redis: RedisConfig { url: None },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
        },
    }
}

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::from_repositories(
            config(),
            Repositories::in_memory(store.clone()),
            CacheService::disabled(),
        );

        Self {
            store,
            router: app(state),
        }
    }

    pub async fn token_for(&self, user_id: i32) -> String {
        let token = JwtClaims {
            user_id,
            exp: None,
        }
        .encode(JWT_SECRET)
        .unwrap();
        self.store.insert_session(user_id, &token).await;
        token
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, body)
    }
}

pub fn booking_service(store: &Arc<InMemoryStore>) -> BookingService {
    BookingService::new(store.clone(), store.clone())
}

/// Регистрация + билет заданного типа для пользователя
pub async fn user_with_ticket(
    store: &InMemoryStore,
    user_id: i32,
    status: TicketStatus,
    is_remote: bool,
    includes_hotel: bool,
) {
    let enrollment = store.insert_enrollment(user_id).await.unwrap();
    let ticket_type = store
        .insert_ticket_type("Ticket", 250, is_remote, includes_hotel)
        .await;
    store
        .insert_ticket(enrollment.id, ticket_type.id, status)
        .await
        .unwrap();
}

pub async fn eligible_user(store: &InMemoryStore, user_id: i32) {
    user_with_ticket(store, user_id, TicketStatus::Paid, false, true).await;
}

pub async fn hotel(store: &InMemoryStore) -> Hotel {
    let name: String = CompanyName().fake();
    let image = format!("https://images.example.com/{}.png", CityName().fake::<String>());
    store.insert_hotel(&name, &image).await
}

pub async fn room(store: &InMemoryStore, capacity: i32) -> Room {
    let hotel = hotel(store).await;
    let name = (100..999).fake::<i32>().to_string();
    store.insert_room(hotel.id, &name, capacity).await
}
