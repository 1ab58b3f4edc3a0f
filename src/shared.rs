use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::auth::TokenConfig;
use crate::users::repository::UserRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository + Send + Sync>,
    pub token_config: TokenConfig,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            user_repository,
            token_config,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown email or wrong password. Both cases share one message.
    #[error("Usuario o contraseña incorrectos")]
    AuthFailed,

    /// Bad signature, malformed payload or expired token. The reason is only logged.
    #[error("Token inválido o expirado")]
    TokenInvalid(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("El email '{0}' ya está registrado.")]
    DuplicateEmail(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Credential error: {0}")]
    CredentialError(String),

    #[error("Token signing error: {0}")]
    TokenSigning(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthFailed | AppError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
            AppError::TokenInvalid(_) | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::StoreError(_)
            | AppError::CredentialError(_)
            | AppError::TokenSigning(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client in the `detail` field
    pub fn detail(&self) -> String {
        match self {
            AppError::StoreError(msg) | AppError::CredentialError(msg) | AppError::Config(msg) => {
                format!("Error interno: {}", msg)
            }
            AppError::TokenSigning(msg) => {
                format!("Error interno: no se pudo firmar el token: {}", msg)
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "detail": self.detail()
        }));

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}
