use std::sync::Arc;

use mopc_auth::{
    config::AppConfig, router, AppError, AppState, InMemoryUserRepository,
    PostgresUserRepository, TokenConfig, UserRepository, UserService,
};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mopc_auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting user registry server");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    let user_repository = build_repository(&config).await?;

    if let Some(bootstrap) = &config.bootstrap_user {
        let service = UserService::new(Arc::clone(&user_repository));
        if service
            .ensure_user(&bootstrap.nombre, &bootstrap.email, &bootstrap.password)
            .await?
        {
            info!(email = %bootstrap.email, "Bootstrap user created");
        }
    }

    let token_config = TokenConfig::new(config.jwt_secret.clone(), config.token_expiration_minutes);
    let app_state = AppState::new(user_repository, token_config);
    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the Postgres store when DATABASE_URL is set, the in-memory store otherwise
async fn build_repository(
    config: &AppConfig,
) -> Result<Arc<dyn UserRepository + Send + Sync>, AppError> {
    match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(url)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to connect to database");
                    AppError::StoreError(e.to_string())
                })?;

            let repository = PostgresUserRepository::new(pool);
            repository.ensure_schema().await?;
            info!("Using PostgreSQL user store");
            Ok(Arc::new(repository))
        }
        None => {
            warn!("DATABASE_URL not set, users are kept in memory and lost on exit");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
    }
}
