use crate::db::SignupCreate;
use crate::error::{CampError, ValidationError};
use crate::server::routes::fields::{int_field, into_object};
use crate::utils::logging::with_pretty_json_debug;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;
use tracing::debug;

/// `POST /signups` body, typed and shape-checked.
pub(crate) struct SignupPreprocess(pub(crate) SignupCreate);

impl<S> FromRequest<S> for SignupPreprocess
where
    S: Send + Sync,
{
    type Rejection = CampError;

    /// A missing or non-integer `time` is an invalid time (422). Missing or
    /// non-integer ids are rejected as `INVALID_REFERENCE` (422); ids that are
    /// integers but resolve to nothing are reported later as 404.
    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, &()).await?;
        with_pretty_json_debug(&body, |pretty_body| {
            debug!(body = %pretty_body, "[Signups] create request body");
        });
        let obj = into_object(body)?;

        let time = int_field(&obj, "time")
            .flatten()
            .ok_or(ValidationError::InvalidTime)?;
        let camper_id = int_field(&obj, "camper_id")
            .flatten()
            .ok_or(CampError::InvalidReference { field: "camper_id" })?;
        let activity_id = int_field(&obj, "activity_id")
            .flatten()
            .ok_or(CampError::InvalidReference {
                field: "activity_id",
            })?;

        Ok(Self(SignupCreate {
            time,
            camper_id,
            activity_id,
        }))
    }
}
