use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::{
    error::{to_api_error, Error},
    middleware::AuthUser,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hotels", get(get_hotels))
        .route("/hotels/{hotel_id}", get(get_hotel_with_rooms))
}

// Для каталога отелей "билет не даёт права на отель" - это 402, а не 403
fn into_hotels_response(err: Error) -> Response {
    match err {
        Error::Forbidden(reason) => {
            tracing::warn!(reason, "hotels requested without a paid hotel ticket");
            to_api_error(StatusCode::PAYMENT_REQUIRED, reason).into_response()
        }
        other => other.into_response(),
    }
}

// GET /api/hotels
async fn get_hotels(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, Response> {
    let hotels = state
        .hotels
        .list_hotels(user.user_id)
        .await
        .map_err(into_hotels_response)?;
    Ok((StatusCode::OK, Json(hotels)))
}

// GET /api/hotels/{hotelId}
async fn get_hotel_with_rooms(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(hotel_id): Path<i32>,
) -> Result<impl IntoResponse, Response> {
    let hotel = state
        .hotels
        .get_hotel_with_rooms(user.user_id, hotel_id)
        .await
        .map_err(into_hotels_response)?;
    Ok((StatusCode::OK, Json(hotel)))
}
