use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    credentials,
    token::TokenConfig,
    types::{TokenClaims, TokenResponse},
};
use crate::{shared::AppError, users::repository::UserRepository};

/// Service for the login flow and token validation
pub struct AuthService {
    token_config: TokenConfig,
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn UserRepository + Send + Sync>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            token_config,
            repository,
        }
    }

    /// Checks the credentials and issues a bearer token for the user.
    ///
    /// An unknown email and a wrong password both fail with `AuthFailed`, so
    /// callers cannot tell which accounts exist.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, AppError> {
        info!("Starting login");

        let user = match self.repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                warn!("Login failed: no user with that email");
                return Err(AppError::AuthFailed);
            }
        };

        let matches =
            credentials::verify_password_blocking(password.to_string(), user.password).await?;
        if !matches {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::AuthFailed);
        }

        let access_token = self.token_config.issue(&user.email)?;

        info!(user_id = user.id, "Login successful, token issued");
        Ok(TokenResponse::bearer(access_token))
    }

    /// Validates a bearer token and returns its claims
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let claims = self.token_config.verify(token)?;
        info!(subject = %claims.sub, "Token validated");
        Ok(claims)
    }
}
