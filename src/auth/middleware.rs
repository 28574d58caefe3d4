// Request-level identity resolution for protected routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::debug;

use crate::auth::{error::AuthError, token::TokenService};

/// Authenticated caller, resolved from the `Authorization: Bearer` header
///
/// Extraction runs before the handler body, so a failed resolution
/// short-circuits the request with a 401 before any database work happens.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        // Only the Bearer scheme is accepted; scheme names are
        // case-insensitive per RFC 7235
        let token = auth_header
            .split_once(' ')
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
            .map(|(_, token)| token)
            .ok_or(AuthError::InvalidToken)?;

        let tokens = TokenService::from_ref(state);
        let identity = tokens.verify(token)?;

        debug!("Resolved identity for {}", identity.subject);
        Ok(AuthenticatedUser {
            email: identity.subject,
        })
    }
}
