//! HTTP handlers, one module per resource.

pub mod artists;
pub mod home;
pub mod shows;
pub mod venues;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use chrono::{DateTime, FixedOffset, Utc};

use crate::error::AppError;

/// Integer id from the `{id}` path segment. Anything else is a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i32);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i32>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(EntityId(id)),
            Err(rejection) => {
                tracing::debug!(%rejection, "non-integer id");
                Err(AppError::NotFound("page"))
            }
        }
    }
}

/// Reference time for splitting shows into past and upcoming.
pub(crate) fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}
