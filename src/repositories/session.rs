use async_trait::async_trait;
use sqlx::PgPool;

use super::Error;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Есть ли у пользователя живая сессия с этим токеном
    async fn has_session(&self, user_id: i32, token: &str) -> Result<bool, Error>;
}

#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn has_session(&self, user_id: i32, token: &str) -> Result<bool, Error> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM sessions WHERE user_id = $1 AND token = $2)",
        )
        .bind(user_id)
        .bind(token)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
