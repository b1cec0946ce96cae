pub mod booking;
pub mod eligibility;
pub mod hotels;

pub use booking::BookingService;
pub use hotels::HotelService;
