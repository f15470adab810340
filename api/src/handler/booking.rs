use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use garde::Validate;

use crate::{
    extractor::AuthorizedUser,
    model::booking::{
        BookingResponse, BookingsResponse, ConfirmBookingRequest, ConfirmBookingResponse,
        CreateBookingRequest, CreateBookingResponse,
    },
};
use kernel::gateway::{notifier::BookingSummary, payment::CreateCheckoutSession};
use kernel::model::{
    booking::{
        event::{CancelBooking, ConfirmBooking, CreateBooking},
        Booking, BookingStatus, ConfirmOutcome, StayPeriod,
    },
    id::{BookingId, RoomId},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn create_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<CreateBookingResponse>)> {
    req.validate(&())?;

    let today = Local::now().date_naive();
    let stay = StayPeriod::new(req.check_in, req.check_out)?;
    if stay.check_in() < today {
        return Err(AppError::UnprocessableEntity(
            "check-in date must not be in the past".into(),
        ));
    }

    let created = registry
        .booking_repository()
        .create(CreateBooking::new(req.room_id, user.id(), stay))
        .await?;

    // A gateway failure aborts the request here; the pending intent is left
    // behind and swept to failed once its TTL passes.
    let session = registry
        .payment_gateway()
        .create_checkout_session(CreateCheckoutSession {
            booking_id: created.booking_id,
            room_id: req.room_id,
            user_id: user.id(),
            amount: created.total_price,
            product_name: created.room_name,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking_id: created.booking_id,
            total_price: created.total_price,
            session_id: session.session_id,
            checkout_url: session.checkout_url,
        }),
    ))
}

pub async fn confirm_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<ConfirmBookingRequest>,
) -> AppResult<Json<ConfirmBookingResponse>> {
    req.validate(&())?;

    let booking = registry
        .booking_repository()
        .find_by_id(req.booking_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("booking ({}) was not found", req.booking_id))
        })?;

    // The redirect parameters travelled through the client; they must name
    // the stored intent exactly.
    let correlated = booking.room.room_id == req.room_id
        && booking.booked_by == req.user_id
        && booking.check_in == req.check_in
        && booking.check_out == req.check_out;
    if !correlated {
        return Err(AppError::UnprocessableEntity(
            "callback parameters do not match the pending booking".into(),
        ));
    }
    if booking.booked_by != user.id() && !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    let today = Local::now().date_naive();
    let outcome = registry
        .booking_repository()
        .confirm(ConfirmBooking::new(req.booking_id, today))
        .await?;

    // Only the transition that actually happened sends mail; a re-delivered
    // callback stays silent.
    if outcome == ConfirmOutcome::Confirmed {
        notify_best_effort(&registry, &booking, NoticeKind::Confirmation).await;
    }

    let status = match outcome {
        ConfirmOutcome::Confirmed | ConfirmOutcome::AlreadyConfirmed => BookingStatus::Confirmed,
        ConfirmOutcome::Conflict => BookingStatus::Failed,
    };

    Ok(Json(ConfirmBookingResponse {
        booking_id: req.booking_id,
        status,
    }))
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let booking = registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("booking ({booking_id}) was not found"))
        })?;

    let today = Local::now().date_naive();
    registry
        .booking_repository()
        .cancel(CancelBooking::new(
            booking_id,
            user.id(),
            user.is_admin(),
            today,
        ))
        .await?;

    notify_best_effort(&registry, &booking, NoticeKind::Cancellation).await;

    Ok(StatusCode::OK)
}

pub async fn show_my_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_repository()
        .find_all_by_user(user.id())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    let booking = registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("booking ({booking_id}) was not found"))
        })?;

    if booking.booked_by != user.id() && !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    Ok(Json(booking.into()))
}

pub async fn show_active_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    let today = Local::now().date_naive();
    registry
        .booking_repository()
        .find_active(today)
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_room_bookings(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .booking_repository()
        .find_by_room(room_id)
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

enum NoticeKind {
    Confirmation,
    Cancellation,
}

async fn notify_best_effort(registry: &AppRegistry, booking: &Booking, kind: NoticeKind) {
    let summary = BookingSummary {
        user_name: booking.user_name.clone(),
        room_name: booking.room.room_name.clone(),
        check_in: booking.check_in,
        check_out: booking.check_out,
        total_price: booking.total_price,
    };
    let notifier = registry.booking_notifier();
    let result = match kind {
        NoticeKind::Confirmation => {
            notifier
                .send_booking_confirmation(&booking.email, &summary)
                .await
        }
        NoticeKind::Cancellation => {
            notifier
                .send_cancellation_notice(&booking.email, &summary)
                .await
        }
    };
    if let Err(e) = result {
        tracing::warn!(
            booking_id = %booking.booking_id,
            error.message = %e,
            "booking notification mail failed"
        );
    }
}
