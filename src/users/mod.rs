// Public API - what other modules can use
pub use handlers::{create_user, list_users};
pub use service::UserService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
