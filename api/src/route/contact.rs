use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::contact::create_contact;

pub fn build_contact_routers() -> Router<AppRegistry> {
    Router::new().route("/contact", post(create_contact))
}
