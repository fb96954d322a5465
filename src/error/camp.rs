use axum::extract::rejection::JsonRejection;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use thiserror::Error as ThisError;
use tracing::error;

use super::validation::ValidationError;

/// Record kinds addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Camper,
    Activity,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Camper => "Camper",
            Entity::Activity => "Activity",
        };
        f.write_str(name)
    }
}

#[derive(Debug, ThisError)]
pub enum CampError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A direct lookup by id found no record.
    #[error("{entity} not found.")]
    NotFound { entity: Entity, id: i64 },

    /// A signup referenced a camper or activity that does not exist.
    #[error("{entity} not found.")]
    Referential { entity: Entity, id: i64 },

    /// A request field that carries a foreign key was missing or not an integer.
    #[error("{field} must be an integer id.")]
    InvalidReference { field: &'static str },

    /// No route matches the path, or an id segment is not an integer.
    #[error("Resource not found.")]
    NoRoute { path: String },

    /// The body was not a JSON object at all.
    #[error("Malformed request body: {0}")]
    BadRequest(String),

    /// The body was sent without a JSON content type.
    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl CampError {
    pub fn status(&self) -> StatusCode {
        match self {
            CampError::Validation(_) | CampError::InvalidReference { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CampError::NotFound { .. }
            | CampError::Referential { .. }
            | CampError::NoRoute { .. } => StatusCode::NOT_FOUND,
            CampError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CampError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            CampError::UnexpectedError(_)
            | CampError::RactorError(_)
            | CampError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CampError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match &self {
            CampError::Validation(err) => ApiErrorObject {
                code: "VALIDATION_FAILED".to_string(),
                message: err.to_string(),
                details: Some(json!({ "field": err.field() })),
            },
            CampError::InvalidReference { field } => ApiErrorObject {
                code: "INVALID_REFERENCE".to_string(),
                message: self.to_string(),
                details: Some(json!({ "field": field })),
            },
            CampError::NotFound { entity, id } | CampError::Referential { entity, id } => {
                ApiErrorObject {
                    code: "NOT_FOUND".to_string(),
                    message: self.to_string(),
                    details: Some(json!({ "entity": entity, "id": id })),
                }
            }
            CampError::NoRoute { path } => ApiErrorObject {
                code: "NOT_FOUND".to_string(),
                message: self.to_string(),
                details: Some(json!({ "path": path })),
            },
            CampError::BadRequest(message) => ApiErrorObject {
                code: "BAD_REQUEST".to_string(),
                message: message.clone(),
                details: None,
            },
            CampError::UnsupportedMediaType(message) => ApiErrorObject {
                code: "UNSUPPORTED_MEDIA_TYPE".to_string(),
                message: message.clone(),
                details: None,
            },
            CampError::UnexpectedError(_)
            | CampError::RactorError(_)
            | CampError::DatabaseError(_) => {
                error!(error = %self, "request failed with internal error");
                ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                }
            }
        };
        (status, Json(ApiErrorBody { inner: body })).into_response()
    }
}

impl From<JsonRejection> for CampError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                CampError::UnsupportedMediaType(rejection.body_text())
            }
            _ => CampError::BadRequest(rejection.body_text()),
        }
    }
}

/// Standardized API error response payload.
#[derive(Debug, Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
