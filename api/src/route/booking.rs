use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    cancel_booking, confirm_booking, create_booking, show_booking, show_my_bookings,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new()
        .route("/", post(create_booking))
        .route("/confirm", post(confirm_booking))
        .route("/me", get(show_my_bookings))
        .route("/:booking_id", get(show_booking))
        .route("/:booking_id/cancel", post(cancel_booking));

    Router::new().nest("/bookings", booking_routers)
}
