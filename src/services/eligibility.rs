use crate::{error::Error, models::TicketStatus, repositories::EnrollmentRepository};

/// Может ли пользователь жить в отеле конференции: нужен оплаченный очный
/// билет с проживанием. Нет регистрации, билета или типа билета - NotFound.
pub async fn ensure_eligible_for_room(
    enrollments: &dyn EnrollmentRepository,
    user_id: i32,
) -> Result<(), Error> {
    let enrollment = enrollments
        .find_enrollment_and_ticket_by_user_id(user_id)
        .await?
        .ok_or(Error::NotFound("enrollment not found"))?;

    let ticket = enrollment
        .ticket
        .ok_or(Error::NotFound("ticket not found"))?;

    let ticket_type = enrollments
        .get_ticket_type(ticket.ticket_type_id)
        .await?
        .ok_or(Error::NotFound("ticket type not found"))?;

    if ticket.status != TicketStatus::Paid {
        return Err(Error::Forbidden("ticket is not paid"));
    }
    if !ticket_type.grants_accommodation() {
        return Err(Error::Forbidden("ticket does not include hotel"));
    }

    Ok(())
}
