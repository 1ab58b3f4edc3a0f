use axum::{extract::State, Extension, Json};
use tracing::{info, instrument};

use super::{
    service::UserService,
    types::{CreateUserRequest, CreateUserResponse, UserResponse},
};
use crate::auth::TokenClaims;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing all users
///
/// GET /usuarios (bearer token required)
/// Returns array of all users without password hashes
#[instrument(name = "list_users", skip(state, claims), fields(subject = %claims.sub))]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    info!("Listing all users");

    let service = UserService::new(state.user_repository.clone());
    let users = service.list_users().await?;

    info!(user_count = users.len(), "Users listed successfully");

    Ok(Json(users))
}

/// HTTP handler for creating a new user
///
/// POST /usuarios (bearer token required)
/// Returns a confirmation message with the new user's email
#[instrument(name = "create_user", skip(state, claims, request), fields(subject = %claims.sub, email = %request.email))]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, AppError> {
    info!("Creating new user");

    let service = UserService::new(state.user_repository.clone());
    let created = service.create_user(request).await?;

    info!(usuario = %created.usuario, "User created successfully");

    Ok(Json(created))
}
