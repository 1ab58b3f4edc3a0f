use axum::Router;
use std::sync::Arc;

use mopc_auth::{
    auth::credentials::hash_password,
    router,
    users::models::NewUser,
    AppState, InMemoryUserRepository, TokenConfig, UserRepository,
};

pub const TEST_SECRET: &str = "integration-test-secret";

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub app: Router,
    pub repository: Arc<InMemoryUserRepository>,
    pub token_config: TokenConfig,
}

pub struct TestAppBuilder {
    users: Vec<(String, String, String)>,
    expiration_minutes: i64,
    store: Option<Arc<dyn UserRepository + Send + Sync>>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            users: vec![],
            expiration_minutes: 30,
            store: None,
        }
    }

    /// Seeds a user directly in the store before the app starts
    pub fn with_user(mut self, nombre: &str, email: &str, password: &str) -> Self {
        self.users
            .push((nombre.to_string(), email.to_string(), password.to_string()));
        self
    }

    pub fn with_admin(self) -> Self {
        self.with_user("Admin", "admin@example.com", "admin-pass")
    }

    pub fn with_expiration_minutes(mut self, minutes: i64) -> Self {
        self.expiration_minutes = minutes;
        self
    }

    /// Serves requests from `store` instead of the seeded in-memory repository
    pub fn with_store(mut self, store: Arc<dyn UserRepository + Send + Sync>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn build(self) -> TestApp {
        let repository = Arc::new(InMemoryUserRepository::new());
        for (nombre, email, password) in self.users {
            repository
                .insert(&NewUser {
                    nombre,
                    email,
                    password_hash: hash_password(&password).unwrap(),
                })
                .await
                .unwrap();
        }

        let token_config = TokenConfig::new(TEST_SECRET, self.expiration_minutes);
        let store: Arc<dyn UserRepository + Send + Sync> = match self.store {
            Some(store) => store,
            None => repository.clone(),
        };
        let app_state = AppState::new(store, token_config.clone());

        TestApp {
            app: router(app_state),
            repository,
            token_config,
        }
    }
}
