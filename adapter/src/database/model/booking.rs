use kernel::model::{
    booking::{Booking, BookingRoom, BookingStatus},
    id::{BookingId, RoomId, UserId},
};
use sqlx::types::chrono::{DateTime, NaiveDate, Utc};

// Full booking view, joined with room and user data.
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub room_name: String,
    pub room_type: String,
    pub price_per_period: i64,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            room_id,
            user_id,
            user_name,
            email,
            check_in,
            check_out,
            total_price,
            status,
            created_at,
            room_name,
            room_type,
            price_per_period,
        } = value;
        Booking {
            booking_id,
            booked_by: user_id,
            user_name,
            email,
            check_in,
            check_out,
            total_price,
            status,
            created_at,
            room: BookingRoom {
                room_id,
                room_name,
                room_type,
                price_per_period,
            },
        }
    }
}

// Minimal row read under a row lock for status transitions.
#[derive(sqlx::FromRow)]
pub struct BookingStateRow {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
}

// Room columns needed to price and label an intent.
#[derive(sqlx::FromRow)]
pub struct RoomPriceRow {
    pub room_id: RoomId,
    pub room_name: String,
    pub price_per_period: i64,
}
