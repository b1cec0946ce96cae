use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Ticket;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i32,
    pub user_id: i32,
}

/// Регистрация пользователя и её единственный билет.
///
/// Связь Enrollment -> Ticket один-к-одному: в БД на `tickets.enrollment_id`
/// стоит UNIQUE, поэтому здесь `Option`, а не список.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentWithTicket {
    pub id: i32,
    pub ticket: Option<Ticket>,
}
