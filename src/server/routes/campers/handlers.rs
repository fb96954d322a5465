use super::extract::{CamperPatchPreprocess, CamperPreprocess};
use crate::error::CampError;
use crate::server::respond::{ActivityView, CamperView, views};
use crate::server::router::CampState;
use crate::server::routes::id::IdPath;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::debug;

pub(super) async fn list_campers_handler(
    State(state): State<CampState>,
) -> Result<Json<Vec<CamperView>>, CampError> {
    let campers = state.db.list_campers().await?;
    Ok(Json(views(campers)))
}

pub(super) async fn create_camper_handler(
    State(state): State<CampState>,
    CamperPreprocess(create): CamperPreprocess,
) -> Result<(StatusCode, Json<CamperView>), CampError> {
    let camper = state.db.create_camper(create).await?;
    debug!(id = camper.id, "camper created via API");
    Ok((StatusCode::CREATED, Json(camper.into())))
}

pub(super) async fn get_camper_handler(
    State(state): State<CampState>,
    IdPath(id): IdPath,
) -> Result<Json<CamperView>, CampError> {
    let camper = state.db.get_camper(id).await?;
    Ok(Json(camper.into()))
}

pub(super) async fn update_camper_handler(
    State(state): State<CampState>,
    IdPath(id): IdPath,
    CamperPatchPreprocess(patch): CamperPatchPreprocess,
) -> Result<Json<CamperView>, CampError> {
    let camper = state.db.update_camper(id, patch).await?;
    Ok(Json(camper.into()))
}

pub(super) async fn camper_activities_handler(
    State(state): State<CampState>,
    IdPath(id): IdPath,
) -> Result<Json<Vec<ActivityView>>, CampError> {
    let activities = state.db.list_camper_activities(id).await?;
    Ok(Json(views(activities)))
}
