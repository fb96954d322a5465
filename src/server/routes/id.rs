use crate::error::CampError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::debug;

/// The `{id}` path segment. A segment that is not an `i64` matches no
/// resource, so it is answered like an unknown route.
pub(crate) struct IdPath(pub(crate) i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = CampError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                debug!(
                    path = parts.uri.path(),
                    reason = %rejection.body_text(),
                    "unparseable id segment"
                );
                Err(CampError::NoRoute {
                    path: parts.uri.path().to_string(),
                })
            }
        }
    }
}
