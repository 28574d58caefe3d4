// Authentication service - login orchestration

use tracing::info;

use crate::auth::{
    error::AuthError, models::TokenResponse, password::PasswordService, token::TokenService,
};
use crate::users::repository::UserRepository;

/// Coordinates credential verification and token issuance
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: UserRepository, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Verify credentials and mint a bearer token
    ///
    /// Unknown email and wrong password both collapse into
    /// `InvalidCredentials`, so the response does not reveal whether an
    /// account exists.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.email)?;
        info!("Issued access token for {}", user.email);

        Ok(TokenResponse::bearer(token))
    }
}
