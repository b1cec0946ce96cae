use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::{
    error::{to_api_error, Error},
    middleware::{AuthUser, ValidatedJson},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/booking", get(get_booking).post(create_booking))
        .route("/booking/{booking_id}", put(update_booking))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[validate(range(min = 1, message = "roomId должен быть > 0"))]
    pub room_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingIdResponse {
    pub booking_id: i32,
}

// GET /api/booking
async fn get_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let booking = state.bookings.get_booking(user.user_id).await?;
    Ok((StatusCode::OK, Json(booking)))
}

// POST /api/booking
async fn create_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<BookingRequest>,
) -> Result<impl IntoResponse, Error> {
    let booking_id = state
        .bookings
        .create_booking(user.user_id, req.room_id)
        .await?;
    Ok((StatusCode::OK, Json(BookingIdResponse { booking_id })))
}

// PUT /api/booking/{bookingId}
async fn update_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(booking_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<BookingRequest>,
) -> Result<impl IntoResponse, axum::response::Response> {
    if booking_id <= 0 {
        return Err(
            to_api_error(StatusCode::BAD_REQUEST, "bookingId должен быть > 0").into_response(),
        );
    }

    let booking_id = state
        .bookings
        .update_booking(user.user_id, req.room_id, booking_id)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok((StatusCode::OK, Json(BookingIdResponse { booking_id })))
}
