use axum::{extract::State, Form, Json};
use tracing::{info, instrument};

use super::{
    service::AuthService,
    types::{LoginForm, TokenResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for password login
///
/// POST /login (form-encoded username, password)
/// Returns a bearer token for the user whose email is `username`
#[instrument(name = "login", skip(state, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    info!("Login requested");

    let service = AuthService::new(state.user_repository.clone(), state.token_config.clone());
    let token = service.login(&form.username, &form.password).await?;

    Ok(Json(token))
}
