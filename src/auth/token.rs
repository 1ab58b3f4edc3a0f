use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::types::TokenClaims;
use crate::shared::AppError;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Configuration for JWT token operations
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub expiration_minutes: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, expiration_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes,
        }
    }

    /// Creates a token for `subject` that expires `expiration_minutes` from now
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        self.issue_at(subject, Utc::now())
    }

    /// Creates a token as if issued at `now`
    #[instrument(skip(self, subject, now))]
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let exp = (now + Duration::minutes(self.expiration_minutes)).timestamp();

        debug!(
            expiration_minutes = self.expiration_minutes,
            exp_timestamp = exp,
            "Creating JWT token with expiration"
        );

        let claims = TokenClaims {
            sub: subject.to_string(),
            exp,
            iat: now.timestamp(),
        };

        encode(
            &Header::new(ALGORITHM),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            AppError::TokenSigning(e.to_string())
        })
    }

    /// Validates a JWT token and returns the claims if valid
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AppError> {
        self.verify_at(token, Utc::now())
    }

    /// Validates a JWT token against the clock reading `now`.
    /// A token stops being valid at the second its `exp` is reached.
    #[instrument(skip(self, token, now))]
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, AppError> {
        debug!("Decoding and validating JWT token");

        let claims = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Self::validation(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "Failed to decode JWT token");
            AppError::TokenInvalid(e.to_string())
        })?;

        if now.timestamp() >= claims.exp {
            debug!(exp = claims.exp, now = now.timestamp(), "JWT token has expired");
            return Err(AppError::TokenInvalid("token expired".to_string()));
        }

        debug!(subject = %claims.sub, exp = claims.exp, "JWT token decoded successfully");
        Ok(claims)
    }

    fn validation() -> Validation {
        // Expiry is checked in verify_at against the caller's clock, with no leeway
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation
    }
}
