use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;

use crate::database::{
    model::booking::{BookingRow, BookingStateRow, RoomPriceRow},
    ConnectionPool,
};
use kernel::model::{
    booking::{
        decide_confirm, ensure_cancellable,
        event::{CancelBooking, ConfirmBooking, CreateBooking},
        Booking, ConfirmOutcome, CreatedBooking, StayPeriod,
    },
    id::{BookingId, RoomId, UserId},
    pricing,
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

const BOOKING_COLUMNS: &str = r#"
    b.booking_id,
    b.room_id,
    b.user_id,
    u.user_name,
    u.email,
    b.check_in,
    b.check_out,
    b.total_price,
    b.status,
    b.created_at,
    r.room_name,
    r.room_type,
    r.price_per_period
"#;

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<CreatedBooking> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let room = sqlx::query_as::<_, RoomPriceRow>(
            r#"
                SELECT room_id, room_name, price_per_period
                FROM rooms
                WHERE room_id = $1
            "#,
        )
        .bind(event.room_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("room ({}) was not found", event.room_id))
        })?;

        // Eager availability check. Only confirmed bookings block; competing
        // pending intents are resolved at confirm time.
        let conflict = self
            .find_confirmed_overlap(&mut tx, event.room_id, None, &event.stay)
            .await?;
        if conflict.is_some() {
            return Err(AppError::BookingConflict(format!(
                "room ({}) already has a confirmed booking for the requested period",
                event.room_id
            )));
        }

        let total_price = pricing::quote_total(
            room.price_per_period,
            event.stay.check_in(),
            event.stay.check_out(),
        );
        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings
                (booking_id, room_id, user_id, check_in, check_out, total_price, status)
                VALUES ($1, $2, $3, $4, $5, $6, 'pending_payment')
            "#,
        )
        .bind(booking_id)
        .bind(event.room_id)
        .bind(event.booked_by)
        .bind(event.stay.check_in())
        .bind(event.stay.check_out())
        .bind(total_price)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no booking record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(CreatedBooking {
            booking_id,
            total_price,
            room_name: room.room_name,
        })
    }

    async fn confirm(&self, event: ConfirmBooking) -> AppResult<ConfirmOutcome> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let state = self.lock_booking(&mut tx, event.booking_id).await?;
        let stay = StayPeriod::new(state.check_in, state.check_out)?;

        // The authoritative re-check: another intent may have been confirmed
        // since this one was created.
        let conflict = self
            .find_confirmed_overlap(&mut tx, state.room_id, Some(state.booking_id), &stay)
            .await?;

        let outcome = decide_confirm(state.status, conflict.is_some())?;
        match outcome {
            ConfirmOutcome::AlreadyConfirmed => {}
            ConfirmOutcome::Conflict => {
                self.set_status(&mut tx, state.booking_id, "failed").await?;
            }
            ConfirmOutcome::Confirmed => {
                self.set_status(&mut tx, state.booking_id, "confirmed")
                    .await?;
                if stay.covers(event.today) {
                    sqlx::query("UPDATE rooms SET available = FALSE WHERE room_id = $1")
                        .bind(state.room_id)
                        .execute(&mut *tx)
                        .await
                        .map_err(AppError::SpecificOperationError)?;
                }
            }
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(outcome)
    }

    async fn cancel(&self, event: CancelBooking) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let state = self.lock_booking(&mut tx, event.booking_id).await?;
        let owned_or_admin = state.user_id == event.requested_user || event.as_admin;
        ensure_cancellable(state.status, owned_or_admin, state.check_in, event.today)?;

        self.set_status(&mut tx, state.booking_id, "cancelled")
            .await?;

        // The room may still be covered today by another confirmed booking.
        sqlx::query(
            r#"
                UPDATE rooms
                SET available = NOT EXISTS (
                    SELECT 1 FROM bookings
                    WHERE room_id = $1
                      AND status = 'confirmed'
                      AND check_in <= $2 AND $2 < check_out
                )
                WHERE room_id = $1
            "#,
        )
        .bind(state.room_id)
        .bind(event.today)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
                SELECT {BOOKING_COLUMNS}
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                INNER JOIN users AS u ON b.user_id = u.user_id
                WHERE b.booking_id = $1
            "#
        ))
        .bind(booking_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Booking::from))
    }

    async fn find_all_by_user(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, BookingRow>(&format!(
            r#"
                SELECT {BOOKING_COLUMNS}
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                INNER JOIN users AS u ON b.user_id = u.user_id
                WHERE b.user_id = $1
                ORDER BY b.created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Booking::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_room(&self, room_id: RoomId) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, BookingRow>(&format!(
            r#"
                SELECT {BOOKING_COLUMNS}
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                INNER JOIN users AS u ON b.user_id = u.user_id
                WHERE b.room_id = $1
                ORDER BY b.check_in ASC
            "#
        ))
        .bind(room_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Booking::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_active(&self, today: NaiveDate) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, BookingRow>(&format!(
            r#"
                SELECT {BOOKING_COLUMNS}
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                INNER JOIN users AS u ON b.user_id = u.user_id
                WHERE b.status = 'confirmed' AND b.check_out > $1
                ORDER BY b.check_in ASC
            "#
        ))
        .bind(today)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Booking::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn expire_stale_pending(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET status = 'failed'
                WHERE status = 'pending_payment' AND created_at < $1
            "#,
        )
        .bind(cutoff)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(res.rows_affected())
    }

    async fn reconcile_availability(&self, today: NaiveDate) -> AppResult<u64> {
        let res = sqlx::query(
            r#"
                UPDATE rooms
                SET available = occupancy.vacant
                FROM (
                    SELECT
                        r.room_id,
                        NOT EXISTS (
                            SELECT 1 FROM bookings b
                            WHERE b.room_id = r.room_id
                              AND b.status = 'confirmed'
                              AND b.check_in <= $1 AND $1 < b.check_out
                        ) AS vacant
                    FROM rooms r
                ) AS occupancy
                WHERE rooms.room_id = occupancy.room_id
                  AND rooms.available <> occupancy.vacant
            "#,
        )
        .bind(today)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(res.rows_affected())
    }
}

impl BookingRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    async fn lock_booking(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        booking_id: BookingId,
    ) -> AppResult<BookingStateRow> {
        sqlx::query_as::<_, BookingStateRow>(
            r#"
                SELECT booking_id, room_id, user_id, check_in, check_out, status
                FROM bookings
                WHERE booking_id = $1
                FOR UPDATE
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound(format!("booking ({booking_id}) was not found")))
    }

    async fn find_confirmed_overlap(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        room_id: RoomId,
        exclude: Option<BookingId>,
        stay: &StayPeriod,
    ) -> AppResult<Option<BookingId>> {
        // Half-open overlap: existing.check_in < new.check_out
        // AND new.check_in < existing.check_out.
        sqlx::query_scalar::<_, BookingId>(
            r#"
                SELECT booking_id
                FROM bookings
                WHERE room_id = $1
                  AND status = 'confirmed'
                  AND booking_id IS DISTINCT FROM $2
                  AND check_in < $4
                  AND $3 < check_out
                LIMIT 1
            "#,
        )
        .bind(room_id)
        .bind(exclude)
        .bind(stay.check_in())
        .bind(stay.check_out())
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn set_status(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        booking_id: BookingId,
        status: &str,
    ) -> AppResult<()> {
        let res = sqlx::query(
            "UPDATE bookings SET status = $2::booking_status WHERE booking_id = $1",
        )
        .bind(booking_id)
        .bind(status)
        .execute(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no booking status has been updated".into(),
            ));
        }
        Ok(())
    }
}
