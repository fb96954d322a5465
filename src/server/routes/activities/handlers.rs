use crate::error::CampError;
use crate::server::respond::{ActivityView, CamperView, views};
use crate::server::router::CampState;
use crate::server::routes::id::IdPath;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::info;

pub(super) async fn list_activities_handler(
    State(state): State<CampState>,
) -> Result<Json<Vec<ActivityView>>, CampError> {
    let activities = state.db.list_activities().await?;
    Ok(Json(views(activities)))
}

/// DELETE /activities/{id}
///
/// Removes the activity and every signup pointing at it. 204 on success,
/// 404 "Activity not found." otherwise.
pub(super) async fn delete_activity_handler(
    State(state): State<CampState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, CampError> {
    state.db.delete_activity(id).await?;
    info!(id, "activity deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn activity_campers_handler(
    State(state): State<CampState>,
    IdPath(id): IdPath,
) -> Result<Json<Vec<CamperView>>, CampError> {
    let campers = state.db.list_activity_campers(id).await?;
    Ok(Json(views(campers)))
}
