use std::env;
use std::net::SocketAddr;

use crate::shared::AppError;

const DEFAULT_TOKEN_EXPIRATION_MINUTES: i64 = 30;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";

/// User created on startup so an empty registry can be logged into
#[derive(Clone, Debug)]
pub struct BootstrapUser {
    pub nombre: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub token_expiration_minutes: i64,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub bootstrap_user: Option<BootstrapUser>,
}

impl AppConfig {
    /// Reads the configuration from the process environment, loading `.env` first if present
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or_else(|| {
            AppError::Config("JWT_SECRET must be set to a non-empty value".to_string())
        })?;

        let token_expiration_minutes = match get("TOKEN_EXPIRATION_MINUTES") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or_else(|| {
                    AppError::Config(format!("Invalid TOKEN_EXPIRATION_MINUTES: {}", raw))
                })?,
            None => DEFAULT_TOKEN_EXPIRATION_MINUTES,
        };

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", raw))
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let raw_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("Invalid BIND_ADDR '{}': {}", raw_addr, e)))?;

        let bootstrap_user = match (
            get("BOOTSTRAP_ADMIN_EMAIL"),
            get("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(BootstrapUser {
                nombre: get("BOOTSTRAP_ADMIN_NOMBRE").unwrap_or_else(|| "Administrador".to_string()),
                email,
                password,
            }),
            (None, None) => None,
            _ => {
                return Err(AppError::Config(
                    "BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together"
                        .to_string(),
                ))
            }
        };

        Ok(Self {
            jwt_secret,
            token_expiration_minutes,
            database_url: get("DATABASE_URL"),
            max_connections,
            bind_addr,
            bootstrap_user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.token_expiration_minutes, 30);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_addr, "0.0.0.0:4000".parse().unwrap());
        assert!(config.database_url.is_none());
        assert!(config.bootstrap_user.is_none());
    }

    #[test]
    fn test_missing_secret_fails() {
        assert!(matches!(config_from(&[]), Err(AppError::Config(_))));
        assert!(matches!(
            config_from(&[("JWT_SECRET", "   ")]),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("JWT_SECRET", "s3cret"),
            ("TOKEN_EXPIRATION_MINUTES", "5"),
            ("DATABASE_URL", "postgres://localhost/usuarios"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();

        assert_eq!(config.token_expiration_minutes, 5);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/usuarios")
        );
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn test_invalid_values_fail() {
        for (key, value) in [
            ("TOKEN_EXPIRATION_MINUTES", "0"),
            ("TOKEN_EXPIRATION_MINUTES", "treinta"),
            ("DATABASE_MAX_CONNECTIONS", "-1"),
            ("BIND_ADDR", "not-an-address"),
        ] {
            let result = config_from(&[("JWT_SECRET", "s3cret"), (key, value)]);
            assert!(matches!(result, Err(AppError::Config(_))), "{}={}", key, value);
        }
    }

    #[test]
    fn test_bootstrap_user() {
        let config = config_from(&[
            ("JWT_SECRET", "s3cret"),
            ("BOOTSTRAP_ADMIN_EMAIL", "admin@example.com"),
            ("BOOTSTRAP_ADMIN_PASSWORD", "admin"),
        ])
        .unwrap();

        let user = config.bootstrap_user.unwrap();
        assert_eq!(user.nombre, "Administrador");
        assert_eq!(user.email, "admin@example.com");

        let partial = config_from(&[
            ("JWT_SECRET", "s3cret"),
            ("BOOTSTRAP_ADMIN_EMAIL", "admin@example.com"),
        ]);
        assert!(matches!(partial, Err(AppError::Config(_))));
    }
}
