use chrono::NaiveDate;
use derive_new::new;

use crate::model::{
    booking::StayPeriod,
    id::{BookingId, RoomId, UserId},
};

#[derive(new)]
pub struct CreateBooking {
    pub room_id: RoomId,
    pub booked_by: UserId,
    pub stay: StayPeriod,
}

#[derive(new)]
pub struct ConfirmBooking {
    pub booking_id: BookingId,
    pub today: NaiveDate,
}

#[derive(new)]
pub struct CancelBooking {
    pub booking_id: BookingId,
    pub requested_user: UserId,
    pub as_admin: bool,
    pub today: NaiveDate,
}
