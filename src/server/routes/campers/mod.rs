use crate::server::router::CampState;
use axum::{Router, routing::get};

pub mod extract;
pub mod handlers;

pub fn router() -> Router<CampState> {
    Router::new()
        .route(
            "/campers",
            get(handlers::list_campers_handler).post(handlers::create_camper_handler),
        )
        .route(
            "/campers/{id}",
            get(handlers::get_camper_handler).patch(handlers::update_camper_handler),
        )
        .route(
            "/campers/{id}/activities",
            get(handlers::camper_activities_handler),
        )
}
