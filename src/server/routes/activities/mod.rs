use crate::server::router::CampState;
use axum::{
    Router,
    routing::{delete, get},
};

pub mod handlers;

pub fn router() -> Router<CampState> {
    Router::new()
        .route("/activities", get(handlers::list_activities_handler))
        .route(
            "/activities/{id}",
            delete(handlers::delete_activity_handler),
        )
        .route(
            "/activities/{id}/campers",
            get(handlers::activity_campers_handler),
        )
}
