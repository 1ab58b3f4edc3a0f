// Public API - what other modules can use
pub use handlers::login;
pub use middleware::jwt_auth;
pub use service::AuthService;
pub use token::TokenConfig;
pub use types::{LoginForm, TokenClaims, TokenResponse};

// Internal modules
pub mod credentials;
mod handlers;
mod middleware;
pub mod service;
mod token;
mod types;
