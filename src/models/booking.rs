use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Room;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
}

// Бронь пользователя вместе с номером, как её отдаёт GET /booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithRoom {
    pub id: i32,
    pub room: Room,
}
