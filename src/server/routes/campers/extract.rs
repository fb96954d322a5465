use crate::db::{CamperCreate, CamperPatch};
use crate::error::{CampError, ValidationError};
use crate::server::routes::fields::{int_field, into_object, str_field};
use crate::utils::logging::with_pretty_json_debug;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;
use tracing::debug;

/// `POST /campers` body, typed and shape-checked.
pub(crate) struct CamperPreprocess(pub(crate) CamperCreate);

impl<S> FromRequest<S> for CamperPreprocess
where
    S: Send + Sync,
{
    type Rejection = CampError;

    /// Name is checked before age. A missing or non-string `name` is an invalid
    /// name; a missing or non-integer `age` is an invalid age. Range checks run
    /// in the persistence layer.
    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, &()).await?;
        with_pretty_json_debug(&body, |pretty_body| {
            debug!(body = %pretty_body, "[Campers] create request body");
        });
        let obj = into_object(body)?;

        let name = str_field(&obj, "name")
            .flatten()
            .ok_or(ValidationError::InvalidName)?;
        let age = int_field(&obj, "age")
            .flatten()
            .ok_or(ValidationError::InvalidAge)?;

        Ok(Self(CamperCreate { name, age }))
    }
}

/// `PATCH /campers/{id}` body. Absent fields stay unchanged.
pub(crate) struct CamperPatchPreprocess(pub(crate) CamperPatch);

impl<S> FromRequest<S> for CamperPatchPreprocess
where
    S: Send + Sync,
{
    type Rejection = CampError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, &()).await?;
        let obj = into_object(body)?;

        let name = str_field(&obj, "name")
            .map(|v| v.ok_or(ValidationError::InvalidName))
            .transpose()?;
        let age = int_field(&obj, "age")
            .map(|v| v.ok_or(ValidationError::InvalidAge))
            .transpose()?;

        Ok(Self(CamperPatch { name, age }))
    }
}
