//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use hearth_domain::id::UserId;

use crate::error::ApiError;

/// Header carrying the id of the signed-in user.
pub const USER_HEADER: &str = "x-user-id";

/// The signed-in user, read from [`USER_HEADER`].
///
/// A missing header rejects with `401`; a malformed id with `400`. Whether the
/// user exists is left to the service being called.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ApiError::Unauthenticated)?;
        Ok(Self(UserId::parse(value)?))
    }
}
