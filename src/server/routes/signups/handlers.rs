use super::extract::SignupPreprocess;
use crate::error::CampError;
use crate::server::respond::{SignupCreatedView, SignupView, views};
use crate::server::router::CampState;
use axum::{Json, extract::State, http::StatusCode};

/// POST /signups
///
/// Responds with the activity the camper was signed up for, not the signup row.
pub(super) async fn create_signup_handler(
    State(state): State<CampState>,
    SignupPreprocess(create): SignupPreprocess,
) -> Result<(StatusCode, Json<SignupCreatedView>), CampError> {
    let (_signup, activity) = state.db.create_signup(create).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupCreatedView {
            activity: activity.into(),
        }),
    ))
}

pub(super) async fn list_signups_handler(
    State(state): State<CampState>,
) -> Result<Json<Vec<SignupView>>, CampError> {
    let signups = state.db.list_signups().await?;
    Ok(Json(views(signups)))
}
