//! `Authorization: Bearer` identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use http::header::AUTHORIZATION;
use http::request::Parts;
use muster_core::error::AppError;
use muster_domain::id::UserId;
use muster_domain::user::UserRole;

use crate::token::{TokenKey, validate_token};

/// Caller identity taken from a validated bearer token.
///
/// Rejects with 401 when the header is absent, not a bearer credential, or the
/// token fails validation. Role enforcement (403) is left to handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: UserRole,
}

fn bearer(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    TokenKey: FromRef<S>,
{
    type Rejection = AppError;

    // The returned future must not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let key = TokenKey::from_ref(state);
        let result = match bearer(parts) {
            None => Err(AppError::Unauthorized),
            Some(token) => validate_token(token, &key)
                .map(|info| Identity {
                    user_id: info.user_id,
                    role: info.role,
                })
                .map_err(|e| {
                    tracing::debug!(error = %e, "bearer token rejected");
                    AppError::Unauthorized
                }),
        };
        async move { result }
    }
}
