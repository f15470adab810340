use async_trait::async_trait;
use chrono::NaiveDate;

use shared::error::AppResult;

pub struct BookingSummary {
    pub user_name: String,
    pub room_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: i64,
}

/// Best-effort mail notifications. Callers log failures and move on; a lost
/// mail never rolls back a booking.
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    async fn send_booking_confirmation(
        &self,
        email: &str,
        summary: &BookingSummary,
    ) -> AppResult<()>;

    async fn send_cancellation_notice(
        &self,
        email: &str,
        summary: &BookingSummary,
    ) -> AppResult<()>;
}
