//! Bearer-token extractor for protected routes.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::token::{AuthError, TokenService};

/// The authenticated caller, extracted from the `Authorization` header.
///
/// Listing this extractor first in a handler runs the auth gate before any
/// body parsing or other processing.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    TokenService: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MissingToken)?;

        let tokens = TokenService::from_ref(state);
        let subject = tokens.verify(token)?;

        Ok(AuthUser { subject })
    }
}
