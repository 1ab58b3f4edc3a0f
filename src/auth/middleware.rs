use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{info, instrument, warn};

use super::service::AuthService;
use crate::shared::{AppError, AppState};

/// JWT authentication middleware - validates Authorization Bearer header and adds TokenClaims to request.
/// Usage: .route_layer(middleware::from_fn_with_state(app_state.clone(), auth::jwt_auth))
/// Handlers can then extract Extension(claims): Extension<TokenClaims>.
#[instrument(skip(state, req, next))]
pub async fn jwt_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    info!(
        "JWT authentication middleware triggered for request {}",
        req.uri()
    );

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header in request");
            AppError::Unauthenticated
        })?;

    let token = bearer_token(auth_header).ok_or_else(|| {
        warn!("Invalid Authorization header format (expected Bearer token)");
        AppError::Unauthenticated
    })?;

    let service = AuthService::new(state.user_repository.clone(), state.token_config.clone());
    let claims = match service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(error = ?e, "JWT authentication failed");
            return Err(e);
        }
    };

    info!(subject = %claims.sub, "Authentication successful, adding claims to request");

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extracts the token from a `Bearer <token>` header value. The scheme is case-insensitive.
fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
