use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::id::{BookingId, RoomId, UserId};
use shared::error::AppResult;

/// Checkout session request sent to the external payment provider. The
/// correlation fields are embedded into the success redirect so the callback
/// can name the pending booking it belongs to.
pub struct CreateCheckoutSession {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub user_id: UserId,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    pub product_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

pub struct CheckoutSession {
    pub session_id: String,
    pub checkout_url: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a checkout session the client is redirected to. Failure here
    /// is fatal to the initiating request; the pending booking row is left
    /// behind for the reconciliation sweep.
    async fn create_checkout_session(
        &self,
        event: CreateCheckoutSession,
    ) -> AppResult<CheckoutSession>;
}
