use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::NewUser,
    repository::UserRepository,
    types::{CreateUserRequest, CreateUserResponse, UserResponse},
};
use crate::{auth::credentials, shared::AppError};

pub const USER_CREATED_MESSAGE: &str = "Usuario creado con éxito";

/// Service for handling user registry business logic
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Lists all registered users without their password hashes
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.repository.list_all().await?;

        info!(user_count = users.len(), "Users retrieved successfully");

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Hashes the password and stores a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<CreateUserResponse, AppError> {
        let password_hash = credentials::hash_password_blocking(request.password).await?;
        debug!("Password hashed");

        let new_user = NewUser {
            nombre: request.nombre,
            email: request.email,
            password_hash,
        };
        let id = self.repository.insert(&new_user).await?;

        info!(user_id = id, "User created successfully");

        Ok(CreateUserResponse {
            message: USER_CREATED_MESSAGE.to_string(),
            usuario: new_user.email,
        })
    }

    /// Creates the user unless the email is already registered.
    /// Returns whether a user was created; an existing user is left as is.
    #[instrument(skip(self, nombre, password))]
    pub async fn ensure_user(
        &self,
        nombre: &str,
        email: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        if self.repository.find_by_email(email).await?.is_some() {
            debug!("User already registered, leaving it untouched");
            return Ok(false);
        }

        let request = CreateUserRequest {
            nombre: nombre.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.create_user(request).await {
            Ok(_) => Ok(true),
            // Lost a race with a concurrent registration of the same email
            Err(AppError::DuplicateEmail(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
