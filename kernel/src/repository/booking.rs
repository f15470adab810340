use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    booking::{
        event::{CancelBooking, ConfirmBooking, CreateBooking},
        Booking, ConfirmOutcome, CreatedBooking,
    },
    id::{BookingId, RoomId, UserId},
};
use shared::error::AppResult;

/// The booking ledger. Implementations must make every state transition
/// atomic with respect to concurrent transitions on the same room: the
/// overlap check and the status write happen inside one serializable unit.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Creates a `pending_payment` intent after an eager availability check
    /// against confirmed bookings. Room availability is not mutated here.
    async fn create(&self, event: CreateBooking) -> AppResult<CreatedBooking>;

    /// The authoritative step, driven by the payment-success callback.
    /// Idempotent: re-delivery on an already confirmed booking is a no-op.
    async fn confirm(&self, event: ConfirmBooking) -> AppResult<ConfirmOutcome>;

    /// Cancels a confirmed booking before its check-in date and restores the
    /// room's availability flag when nothing else covers today.
    async fn cancel(&self, event: CancelBooking) -> AppResult<()>;

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    async fn find_all_by_user(&self, user_id: UserId) -> AppResult<Vec<Booking>>;
    async fn find_by_room(&self, room_id: RoomId) -> AppResult<Vec<Booking>>;
    /// Confirmed bookings whose stay has not ended, with room and user data.
    async fn find_active(&self, today: NaiveDate) -> AppResult<Vec<Booking>>;

    /// Sweeps pending intents created before `cutoff` to `failed`.
    /// Returns the number of expired intents.
    async fn expire_stale_pending(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    /// Re-derives the cached `available` flag of every room from the set of
    /// confirmed bookings covering `today`. Idempotent; returns the number of
    /// rooms whose flag changed.
    async fn reconcile_availability(&self, today: NaiveDate) -> AppResult<u64>;
}
