use serde::{Deserialize, Serialize};

use super::models::UserSummary;

/// Request payload for creating a new user
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub nombre: String,
    pub email: String,
    pub password: String,
}

/// A user as returned by the listing endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub nombre: String,
    pub email: String,
}

impl From<UserSummary> for UserResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            nombre: user.nombre,
            email: user.email,
        }
    }
}

/// Response for a successful user creation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreateUserResponse {
    pub message: String,
    pub usuario: String, // Email of the created user
}
