use async_trait::async_trait;
use sqlx::PgPool;

use super::Error;
use crate::models::{EnrollmentWithTicket, Ticket, TicketStatus, TicketType};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn find_enrollment_and_ticket_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<EnrollmentWithTicket>, Error>;

    async fn get_ticket_type(&self, ticket_type_id: i32) -> Result<Option<TicketType>, Error>;
}

#[derive(Clone)]
pub struct PgEnrollmentRepository {
    pool: PgPool,
}

impl PgEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EnrollmentTicketRow {
    enrollment_id: i32,
    ticket_id: Option<i32>,
    ticket_type_id: Option<i32>,
    status: Option<TicketStatus>,
}

impl TryFrom<EnrollmentTicketRow> for EnrollmentWithTicket {
    type Error = Error;

    fn try_from(row: EnrollmentTicketRow) -> Result<Self, Self::Error> {
        let ticket = match (row.ticket_id, row.ticket_type_id, row.status) {
            (None, _, _) => None,
            (Some(id), Some(ticket_type_id), Some(status)) => Some(Ticket {
                id,
                enrollment_id: row.enrollment_id,
                ticket_type_id,
                status,
            }),
            _ => return Err(Error::Corrupted("ticket row with NULL columns")),
        };

        Ok(EnrollmentWithTicket {
            id: row.enrollment_id,
            ticket,
        })
    }
}

#[async_trait]
impl EnrollmentRepository for PgEnrollmentRepository {
    async fn find_enrollment_and_ticket_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<EnrollmentWithTicket>, Error> {
        // tickets.enrollment_id уникален, так что JOIN даёт не больше одной строки
        let row: Option<EnrollmentTicketRow> = sqlx::query_as(
            r#"
            SELECT e.id AS enrollment_id, t.id AS ticket_id, t.ticket_type_id, t.status
            FROM enrollments e
            LEFT JOIN tickets t ON t.enrollment_id = e.id
            WHERE e.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(EnrollmentWithTicket::try_from).transpose()
    }

    async fn get_ticket_type(&self, ticket_type_id: i32) -> Result<Option<TicketType>, Error> {
        let ticket_type = sqlx::query_as::<_, TicketType>(
            "SELECT id, name, price, is_remote, includes_hotel FROM ticket_types WHERE id = $1",
        )
        .bind(ticket_type_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ticket_type)
    }
}
