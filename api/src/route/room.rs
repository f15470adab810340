use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::room::{show_room, show_room_availability, show_room_list};

pub fn build_room_routers() -> Router<AppRegistry> {
    let room_routers = Router::new()
        .route("/", get(show_room_list))
        .route("/:room_id", get(show_room))
        .route("/:room_id/availability", get(show_room_availability));

    Router::new().nest("/rooms", room_routers)
}
