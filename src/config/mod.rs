use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub const DEFAULT_PORT: u16 = 3000;

    /// Tokens are valid for seven days unless overridden.
    pub const DEFAULT_JWT_EXPIRY_HOURS: u64 = 24 * 7;

    /// Upper bound on token lifetime: ten years.
    pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 365 * 10;

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Required keys are
    /// `DATABASE_URL` and `JWT_SECRET`; everything else falls back to the
    /// preset for `APP_ENV`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let environment = match get("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let mut config = match environment {
            Environment::Production => Self::production(database_url, jwt_secret),
            Environment::Development => Self::development(database_url, jwt_secret),
        };

        if let Some(v) = get("PORT") {
            config.server.port = parse("PORT", v)?;
        }
        if let Some(v) = get("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections = parse("DATABASE_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = get("DATABASE_CONNECTION_TIMEOUT") {
            config.database.connection_timeout = parse("DATABASE_CONNECTION_TIMEOUT", v)?;
        }
        if let Some(v) = get("SECURITY_JWT_EXPIRY_HOURS") {
            let hours: u64 = parse("SECURITY_JWT_EXPIRY_HOURS", v.clone())?;
            if !(1..=Self::MAX_JWT_EXPIRY_HOURS).contains(&hours) {
                return Err(ConfigError::Invalid {
                    name: "SECURITY_JWT_EXPIRY_HOURS",
                    value: v,
                });
            }
            config.security.jwt_expiry_hours = hours;
        }
        if let Some(v) = get("SECURITY_CORS_ORIGINS") {
            config.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    fn development(database_url: String, jwt_secret: String) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: Self::DEFAULT_PORT,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours: Self::DEFAULT_JWT_EXPIRY_HOURS,
                cors_origins: vec![],
            },
        }
    }

    fn production(database_url: String, jwt_secret: String) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: Self::DEFAULT_PORT,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours: Self::DEFAULT_JWT_EXPIRY_HOURS,
                cors_origins: vec![],
            },
        }
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { name, value })
}
