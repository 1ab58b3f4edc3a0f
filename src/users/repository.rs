use async_trait::async_trait;
use sqlx::{pool::PoolConnection, PgPool, Postgres};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

use super::models::{NewUser, UserModel, UserSummary};
use crate::shared::AppError;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError>;

    /// Lists every user without the password hash, in ascending id order
    async fn list_all(&self) -> Result<Vec<UserSummary>, AppError>;

    /// Inserts a user and returns the assigned id.
    /// Fails with `DuplicateEmail` if the email is already registered.
    async fn insert(&self, user: &NewUser) -> Result<i64, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}

struct InMemoryUsers {
    rows: Vec<UserModel>,
    next_id: i64,
}

/// In-memory implementation of UserRepository for development and testing
///
/// Data is lost when the process exits. Ids start at 1 and increase with
/// every successful insert, matching a serial column.
pub struct InMemoryUserRepository {
    users: Mutex<InMemoryUsers>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            users: Mutex::new(InMemoryUsers {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, InMemoryUsers>, AppError> {
        self.users
            .lock()
            .map_err(|_| AppError::StoreError("user store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        debug!("Fetching user from memory");

        let users = self.lock()?;
        let user = users.rows.iter().find(|u| u.email == email).cloned();

        match &user {
            Some(u) => debug!(user_id = u.id, "User found in memory"),
            None => debug!("User not found in memory"),
        }

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<UserSummary>, AppError> {
        debug!("Listing all users in memory");

        let users = self.lock()?;
        Ok(users.rows.iter().map(UserSummary::from).collect())
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, user: &NewUser) -> Result<i64, AppError> {
        debug!("Inserting user in memory");

        let mut users = self.lock()?;
        if users.rows.iter().any(|u| u.email == user.email) {
            warn!("Email already registered in memory");
            return Err(AppError::DuplicateEmail(user.email.clone()));
        }

        let id = users.next_id;
        users.next_id += 1;
        users.rows.push(UserModel {
            id,
            nombre: user.nombre.clone(),
            email: user.email.clone(),
            password: user.password_hash.clone(),
        });

        debug!(user_id = id, "User inserted in memory");
        Ok(id)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.rows.len() as i64)
    }
}

/// PostgreSQL implementation of user repository
///
/// Every call checks a connection out of the pool and hands it back when the
/// guard drops, on success and error paths alike.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the usuarios table if it does not exist yet
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        let mut conn = self.acquire().await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS usuarios (
                id BIGSERIAL PRIMARY KEY,
                nombre TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            )",
        )
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create usuarios table");
            AppError::StoreError(e.to_string())
        })?;

        debug!("usuarios table is ready");
        Ok(())
    }

    async fn acquire(&self) -> Result<PoolConnection<Postgres>, AppError> {
        self.pool.acquire().await.map_err(|e| {
            warn!(error = %e, "Failed to acquire database connection");
            AppError::StoreError(e.to_string())
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        debug!("Fetching user from database");
        let mut conn = self.acquire().await?;

        let user = sqlx::query_as::<_, UserModel>(
            "SELECT id, nombre, email, password FROM usuarios WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch user from database");
            AppError::StoreError(e.to_string())
        })?;

        match &user {
            Some(u) => debug!(user_id = u.id, "User found in database"),
            None => debug!("User not found in database"),
        }

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<UserSummary>, AppError> {
        debug!("Listing all users from database");
        let mut conn = self.acquire().await?;

        let users =
            sqlx::query_as::<_, UserSummary>("SELECT id, nombre, email FROM usuarios ORDER BY id")
                .fetch_all(&mut *conn)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Failed to list users from database");
                    AppError::StoreError(e.to_string())
                })?;

        debug!(user_count = users.len(), "Users listed from database");
        Ok(users)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, user: &NewUser) -> Result<i64, AppError> {
        debug!("Inserting user in database");
        let mut conn = self.acquire().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO usuarios (nombre, email, password) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&user.nombre)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                warn!("Email already registered in database");
                AppError::DuplicateEmail(user.email.clone())
            }
            _ => {
                warn!(error = %e, "Failed to insert user in database");
                AppError::StoreError(e.to_string())
            }
        })?;

        debug!(user_id = id, "User inserted in database");
        Ok(id)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let mut conn = self.acquire().await?;

        sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| AppError::StoreError(e.to_string()))
    }
}
