use async_trait::async_trait;

use mopc_auth::{
    users::models::{NewUser, UserModel, UserSummary},
    AppError, UserRepository,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Store whose every call fails, as when the database is unreachable
#[derive(Clone)]
pub struct FailingUserRepository {
    message: String,
}

impl FailingUserRepository {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    fn error(&self) -> AppError {
        AppError::StoreError(self.message.clone())
    }
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn find_by_email(&self, _email: &str) -> Result<Option<UserModel>, AppError> {
        Err(self.error())
    }

    async fn list_all(&self) -> Result<Vec<UserSummary>, AppError> {
        Err(self.error())
    }

    async fn insert(&self, _user: &NewUser) -> Result<i64, AppError> {
        Err(self.error())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(self.error())
    }
}
