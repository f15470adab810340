use chrono::{DateTime, NaiveDate, Utc};
use garde::Validate;
use kernel::model::{
    booking::{Booking, BookingRoom, BookingStatus},
    id::{BookingId, RoomId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(skip)]
    pub room_id: RoomId,
    #[garde(skip)]
    pub check_in: NaiveDate,
    #[garde(skip)]
    pub check_out: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub booking_id: BookingId,
    pub total_price: i64,
    pub session_id: String,
    pub checkout_url: String,
}

// The payment redirect hands these back through the client; every field is
// re-validated against the stored pending booking before any transition.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBookingRequest {
    #[garde(skip)]
    pub booking_id: BookingId,
    #[garde(skip)]
    pub room_id: RoomId,
    #[garde(skip)]
    pub user_id: UserId,
    #[garde(skip)]
    pub check_in: NaiveDate,
    #[garde(skip)]
    pub check_out: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBookingResponse {
    pub booking_id: BookingId,
    pub status: BookingStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub user_name: String,
    pub email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub room: BookingRoomResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            booked_by,
            user_name,
            email,
            check_in,
            check_out,
            total_price,
            status,
            created_at,
            room,
        } = value;
        Self {
            booking_id,
            booked_by,
            user_name,
            email,
            check_in,
            check_out,
            total_price,
            status,
            created_at,
            room: room.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRoomResponse {
    pub room_id: RoomId,
    pub room_name: String,
    pub room_type: String,
    pub price_per_period: i64,
}

impl From<BookingRoom> for BookingRoomResponse {
    fn from(value: BookingRoom) -> Self {
        let BookingRoom {
            room_id,
            room_name,
            room_type,
            price_per_period,
        } = value;
        Self {
            room_id,
            room_name,
            room_type,
            price_per_period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_camel_case_payload() {
        let req: CreateBookingRequest = serde_json::from_str(
            r#"{
                "roomId": "7b1c2f4e-9d9f-4a8a-8a50-2f8f2f1d6a01",
                "checkIn": "2025-02-01",
                "checkOut": "2025-04-01"
            }"#,
        )
        .unwrap();
        assert_eq!(
            req.check_in,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
        );
        assert!(req.validate(&()).is_ok());
    }

    #[test]
    fn status_serializes_snake_case() {
        let res = ConfirmBookingResponse {
            booking_id: BookingId::new(),
            status: BookingStatus::PendingPayment,
        };
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["status"], "pending_payment");
    }
}
