use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    booking::{show_active_bookings, show_room_bookings},
    contact::show_contact_list,
    room::{delete_room, register_room, update_room},
    user::{delete_user, show_user_list},
};

pub fn build_admin_routers() -> Router<AppRegistry> {
    let admin_routers = Router::new()
        .route("/rooms", post(register_room))
        .route("/rooms/:room_id", put(update_room))
        .route("/rooms/:room_id", delete(delete_room))
        .route("/rooms/:room_id/bookings", get(show_room_bookings))
        .route("/bookings", get(show_active_bookings))
        .route("/users", get(show_user_list))
        .route("/users/:user_id", delete(delete_user))
        .route("/contacts", get(show_contact_list));

    Router::new().nest("/admin", admin_routers)
}
