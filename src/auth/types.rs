use serde::{Deserialize, Serialize};

/// JWT claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    pub sub: String, // Email of the authenticated user
    pub exp: i64,    // Expiration timestamp (standard JWT claim)
    pub iat: i64,    // Issued at timestamp (standard JWT claim)
}

/// Form payload for the login endpoint
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Response structure for a successful login
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
