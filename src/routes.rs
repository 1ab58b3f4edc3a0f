use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{auth, shared::AppState, users};

pub const ROOT_MESSAGE: &str = "Backend funcionando";

/// Builds the application router.
///
/// `/` and `/login` are public; every `/usuarios` route sits behind the
/// bearer-token guard.
pub fn router(app_state: AppState) -> Router {
    let protected = Router::new()
        .route("/usuarios", get(users::list_users).post(users::create_user))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::jwt_auth,
        ));

    Router::new()
        .route("/", get(root))
        .route("/login", post(auth::login))
        .merge(protected)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": ROOT_MESSAGE }))
}

/// Any origin, method and header is accepted
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
