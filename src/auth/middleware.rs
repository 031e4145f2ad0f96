use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::api::state::AppState;
use crate::auth::{AuthError, AuthUser};
use crate::error::AppError;

/// Authenticates the caller from the `Authorization` header.
///
/// The database must be configured before auth is even attempted, so an
/// unconfigured deployment answers 500 rather than 401.
#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        state.store()?;
        let verifier = state.token_verifier()?;

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or(AuthError::MissingAuthHeader)?;

        verifier.verify(auth_header).map_err(|err| {
            warn!(error = %err, path = %parts.uri.path(), "Rejected bearer token");
            AppError::from(err)
        })
    }
}
