use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::repositories;

/// Ошибки сервисного слоя.
///
/// Бизнес-ошибок ровно две: `NotFound` и `Forbidden`. Всё остальное -
/// сбой хранилища, клиент получает непрозрачный 500.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("database error: {0}")]
    Database(#[from] repositories::Error),
}

#[derive(Serialize)]
pub struct ApiError {
    success: bool,
    message: String,
}

pub fn to_api_error(status: StatusCode, message: &str) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            success: false,
            message: message.to_string(),
        }),
    )
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound(reason) => {
                tracing::warn!(err = %self);
                to_api_error(StatusCode::NOT_FOUND, reason).into_response()
            }
            Error::Forbidden(reason) => {
                tracing::warn!(err = %self);
                to_api_error(StatusCode::FORBIDDEN, reason).into_response()
            }
            Error::Database(_) => {
                tracing::error!(err = %self);
                to_api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
                    .into_response()
            }
        }
    }
}
