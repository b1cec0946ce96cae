//! Слой доступа к данным.
//!
//! Каждый репозиторий описан трейтом (контракт, который вызывает сервисный слой)
//! и имеет реализацию на Postgres. `InMemoryStore` реализует все трейты сразу
//! и используется в тестах и при локальной разработке.

pub mod booking;
pub mod enrollment;
pub mod hotel;
pub mod memory;
pub mod session;

pub use booking::{BookingRepository, PgBookingRepository, ReserveOutcome};
pub use enrollment::{EnrollmentRepository, PgEnrollmentRepository};
pub use hotel::{HotelRepository, PgHotelRepository};
pub use memory::InMemoryStore;
pub use session::{PgSessionRepository, SessionRepository};

use sqlx::PgPool;
use std::sync::Arc;

#[cfg(test)]
pub use booking::MockBookingRepository;
#[cfg(test)]
pub use enrollment::MockEnrollmentRepository;
#[cfg(test)]
pub use hotel::MockHotelRepository;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("unique constraint violated: {0}")]
    UniqueViolation(&'static str),

    /// Строка из БД не соответствует схеме (например, частично NULL в JOIN)
    #[error("corrupted row: {0}")]
    Corrupted(&'static str),
}

impl Error {
    pub(crate) fn from_insert(err: sqlx::Error, constraint: &'static str) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Error::UniqueViolation(constraint)
            }
            other => Error::Sqlx(other),
        }
    }
}

/// Набор репозиториев, из которого собирается `AppState`.
#[derive(Clone)]
pub struct Repositories {
    pub bookings: Arc<dyn BookingRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub hotels: Arc<dyn HotelRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            bookings: Arc::new(PgBookingRepository::new(pool.clone())),
            enrollments: Arc::new(PgEnrollmentRepository::new(pool.clone())),
            hotels: Arc::new(PgHotelRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool)),
        }
    }

    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            bookings: store.clone(),
            enrollments: store.clone(),
            hotels: store.clone(),
            sessions: store,
        }
    }
}
