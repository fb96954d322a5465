use crate::server::router::CampState;
use axum::{Router, routing::get};

pub mod extract;
pub mod handlers;

pub fn router() -> Router<CampState> {
    Router::new().route(
        "/signups",
        get(handlers::list_signups_handler).post(handlers::create_signup_handler),
    )
}
