pub mod booking;
pub mod enrollment;
pub mod hotel;
pub mod ticket;

pub use booking::{Booking, BookingWithRoom};
pub use enrollment::{Enrollment, EnrollmentWithTicket};
pub use hotel::{Hotel, HotelWithRooms, Room, RoomOccupancy, RoomWithBookingCount};
pub use ticket::{Ticket, TicketStatus, TicketType};
