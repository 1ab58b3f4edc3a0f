// Library crate for the user registry server
// This file exposes the public API for the binary and integration tests

pub mod auth;
pub mod config;
pub mod routes;
pub mod shared;
pub mod users;

// Re-export commonly used types for easier access in tests
pub use auth::{TokenClaims, TokenConfig, TokenResponse};
pub use config::AppConfig;
pub use routes::router;
pub use shared::{AppError, AppState};
pub use users::{
    repository::{InMemoryUserRepository, PostgresUserRepository, UserRepository},
    UserService,
};
