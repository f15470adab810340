use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::id::{BookingId, RoomId, UserId};
use shared::error::{AppError, AppResult};

pub mod event;

/// A half-open stay interval `[check_in, check_out)`.
///
/// Construction enforces `check_in < check_out`, so every value of this type
/// is a valid, non-empty interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPeriod {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayPeriod {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> AppResult<Self> {
        if check_in >= check_out {
            return Err(AppError::UnprocessableEntity(
                "check-in date must be before the check-out date".into(),
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Two half-open intervals overlap iff `a1 < b2 && b1 < a2`.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    pub fn covers(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day < self.check_out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
pub enum BookingStatus {
    PendingPayment,
    Confirmed,
    Cancelled,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The booking transitioned `pending_payment -> confirmed`.
    Confirmed,
    /// The booking was already confirmed; the call is a no-op.
    AlreadyConfirmed,
    /// A confirmed booking for an overlapping period won the race;
    /// the booking transitioned `pending_payment -> failed`.
    Conflict,
}

/// Decides the confirm transition for a booking in `status`, given whether a
/// conflicting confirmed booking exists for the same room.
///
/// Re-invocation on an already confirmed booking is a no-op success, which is
/// what makes payment-callback re-delivery safe.
pub fn decide_confirm(status: BookingStatus, has_conflict: bool) -> AppResult<ConfirmOutcome> {
    match status {
        BookingStatus::Confirmed => Ok(ConfirmOutcome::AlreadyConfirmed),
        BookingStatus::PendingPayment if has_conflict => Ok(ConfirmOutcome::Conflict),
        BookingStatus::PendingPayment => Ok(ConfirmOutcome::Confirmed),
        BookingStatus::Cancelled => Err(AppError::UnprocessableEntity(
            "the booking has been cancelled".into(),
        )),
        BookingStatus::Failed => Err(AppError::UnprocessableEntity(
            "the booking is no longer awaiting payment".into(),
        )),
    }
}

/// Guards the `confirmed -> cancelled` transition.
pub fn ensure_cancellable(
    status: BookingStatus,
    owned_or_admin: bool,
    check_in: NaiveDate,
    today: NaiveDate,
) -> AppResult<()> {
    if !owned_or_admin {
        return Err(AppError::ForbiddenOperation);
    }
    if status != BookingStatus::Confirmed {
        return Err(AppError::UnprocessableEntity(
            "only a confirmed booking can be cancelled".into(),
        ));
    }
    if check_in <= today {
        return Err(AppError::UnprocessableEntity(
            "the booking can no longer be cancelled: check-in has passed".into(),
        ));
    }
    Ok(())
}

#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub user_name: String,
    pub email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub room: BookingRoom,
}

impl Booking {
    pub fn period(&self) -> StayPeriod {
        // check_in < check_out is a table constraint
        StayPeriod {
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }
}

#[derive(Debug)]
pub struct BookingRoom {
    pub room_id: RoomId,
    pub room_name: String,
    pub room_type: String,
    pub price_per_period: i64,
}

/// Result of a successful intent creation.
#[derive(Debug)]
pub struct CreatedBooking {
    pub booking_id: BookingId,
    pub total_price: i64,
    pub room_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(a: NaiveDate, b: NaiveDate) -> StayPeriod {
        StayPeriod::new(a, b).unwrap()
    }

    #[test]
    fn stay_period_rejects_inverted_and_empty_ranges() {
        let day = date(2024, 1, 10);
        assert!(StayPeriod::new(day, day).is_err());
        assert!(StayPeriod::new(date(2024, 1, 11), day).is_err());
        assert!(StayPeriod::new(day, date(2024, 1, 11)).is_ok());
    }

    #[test]
    fn overlap_is_half_open() {
        let jan = period(date(2024, 1, 1), date(2024, 2, 1));
        let feb = period(date(2024, 2, 1), date(2024, 3, 1));
        let mid_jan = period(date(2024, 1, 15), date(2024, 2, 15));

        // touching intervals share no day
        assert!(!jan.overlaps(&feb));
        assert!(!feb.overlaps(&jan));

        assert!(jan.overlaps(&mid_jan));
        assert!(mid_jan.overlaps(&feb));

        // containment
        let inner = period(date(2024, 1, 10), date(2024, 1, 20));
        assert!(jan.overlaps(&inner));
        assert!(inner.overlaps(&jan));
    }

    #[test]
    fn covers_excludes_check_out_day() {
        let stay = period(date(2024, 1, 1), date(2024, 2, 1));
        assert!(stay.covers(date(2024, 1, 1)));
        assert!(stay.covers(date(2024, 1, 31)));
        assert!(!stay.covers(date(2024, 2, 1)));
        assert!(!stay.covers(date(2023, 12, 31)));
    }

    #[test]
    fn confirm_decision_covers_every_state() {
        assert_eq!(
            decide_confirm(BookingStatus::PendingPayment, false).unwrap(),
            ConfirmOutcome::Confirmed
        );
        assert_eq!(
            decide_confirm(BookingStatus::PendingPayment, true).unwrap(),
            ConfirmOutcome::Conflict
        );
        // already-confirmed bookings are a no-op success, twice over
        assert_eq!(
            decide_confirm(BookingStatus::Confirmed, false).unwrap(),
            ConfirmOutcome::AlreadyConfirmed
        );
        assert_eq!(
            decide_confirm(BookingStatus::Confirmed, true).unwrap(),
            ConfirmOutcome::AlreadyConfirmed
        );
        assert!(decide_confirm(BookingStatus::Cancelled, false).is_err());
        assert!(decide_confirm(BookingStatus::Failed, false).is_err());
    }

    #[test]
    fn cancellation_window_closes_at_check_in() {
        let today = date(2024, 6, 1);
        let future = date(2024, 6, 2);

        assert!(ensure_cancellable(BookingStatus::Confirmed, true, future, today).is_ok());
        // check-in today or earlier is too late
        assert!(ensure_cancellable(BookingStatus::Confirmed, true, today, today).is_err());
        assert!(
            ensure_cancellable(BookingStatus::Confirmed, true, date(2024, 5, 1), today).is_err()
        );
    }

    #[test]
    fn cancellation_requires_owner_or_admin_and_confirmed_state() {
        let today = date(2024, 6, 1);
        let future = date(2024, 7, 1);

        assert!(matches!(
            ensure_cancellable(BookingStatus::Confirmed, false, future, today),
            Err(AppError::ForbiddenOperation)
        ));
        assert!(ensure_cancellable(BookingStatus::PendingPayment, true, future, today).is_err());
        assert!(ensure_cancellable(BookingStatus::Cancelled, true, future, today).is_err());
    }

    // A minimal in-memory ledger over the pure decision functions. It mirrors
    // what the Postgres repository does inside one SERIALIZABLE transaction:
    // scan confirmed bookings for the room, decide, then apply.
    struct Ledger {
        entries: Vec<(BookingId, StayPeriod, BookingStatus)>,
    }

    impl Ledger {
        fn new() -> Self {
            Self {
                entries: Vec::new(),
            }
        }

        fn create(&mut self, stay: StayPeriod) -> BookingId {
            let id = BookingId::new();
            self.entries.push((id, stay, BookingStatus::PendingPayment));
            id
        }

        fn confirm(&mut self, id: BookingId) -> AppResult<ConfirmOutcome> {
            let idx = self.entries.iter().position(|(i, _, _)| *i == id).unwrap();
            let stay = self.entries[idx].1;
            let has_conflict = self
                .entries
                .iter()
                .any(|(i, other, status)| {
                    *i != id && *status == BookingStatus::Confirmed && other.overlaps(&stay)
                });
            let outcome = decide_confirm(self.entries[idx].2, has_conflict)?;
            self.entries[idx].2 = match outcome {
                ConfirmOutcome::Confirmed | ConfirmOutcome::AlreadyConfirmed => {
                    BookingStatus::Confirmed
                }
                ConfirmOutcome::Conflict => BookingStatus::Failed,
            };
            Ok(outcome)
        }

        fn cancel(&mut self, id: BookingId, today: NaiveDate) -> AppResult<()> {
            let idx = self.entries.iter().position(|(i, _, _)| *i == id).unwrap();
            let (_, stay, status) = self.entries[idx];
            ensure_cancellable(status, true, stay.check_in(), today)?;
            self.entries[idx].2 = BookingStatus::Cancelled;
            Ok(())
        }

        fn available_on(&self, day: NaiveDate) -> bool {
            !self.entries.iter().any(|(_, stay, status)| {
                *status == BookingStatus::Confirmed && stay.covers(day)
            })
        }

        fn assert_no_double_booking(&self) {
            let confirmed: Vec<_> = self
                .entries
                .iter()
                .filter(|(_, _, s)| *s == BookingStatus::Confirmed)
                .collect();
            for (n, a) in confirmed.iter().enumerate() {
                for b in confirmed.iter().skip(n + 1) {
                    assert!(!a.1.overlaps(&b.1), "confirmed bookings overlap");
                }
            }
        }
    }

    #[test]
    fn second_confirm_of_overlapping_intents_loses() {
        let mut ledger = Ledger::new();
        let first = ledger.create(period(date(2025, 1, 1), date(2025, 1, 10)));
        let second = ledger.create(period(date(2025, 1, 5), date(2025, 1, 15)));

        assert_eq!(ledger.confirm(first).unwrap(), ConfirmOutcome::Confirmed);
        assert_eq!(ledger.confirm(second).unwrap(), ConfirmOutcome::Conflict);
        ledger.assert_no_double_booking();

        // availability reflects only the winner
        assert!(!ledger.available_on(date(2025, 1, 3)));
        assert!(ledger.available_on(date(2025, 1, 12)));
    }

    #[test]
    fn create_confirm_cancel_round_trip_restores_availability() {
        let today = date(2025, 1, 1);
        let mut ledger = Ledger::new();
        let id = ledger.create(period(date(2025, 2, 1), date(2025, 4, 1)));

        assert_eq!(ledger.confirm(id).unwrap(), ConfirmOutcome::Confirmed);
        assert!(!ledger.available_on(date(2025, 2, 15)));

        // re-delivered callback is a no-op
        assert_eq!(
            ledger.confirm(id).unwrap(),
            ConfirmOutcome::AlreadyConfirmed
        );

        ledger.cancel(id, today).unwrap();
        assert!(ledger.available_on(date(2025, 2, 15)));
        ledger.assert_no_double_booking();
    }

    #[test]
    fn back_to_back_stays_both_confirm() {
        let mut ledger = Ledger::new();
        let first = ledger.create(period(date(2025, 3, 1), date(2025, 4, 1)));
        let second = ledger.create(period(date(2025, 4, 1), date(2025, 5, 1)));

        assert_eq!(ledger.confirm(first).unwrap(), ConfirmOutcome::Confirmed);
        assert_eq!(ledger.confirm(second).unwrap(), ConfirmOutcome::Confirmed);
        ledger.assert_no_double_booking();
    }
}
