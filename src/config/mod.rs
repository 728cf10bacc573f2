use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL; when unset it is assembled from `postgres`
    pub url: Option<String>,
    pub postgres: PostgresParts,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

/// Individual POSTGRES_* settings used when DATABASE_URL is absent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresParts {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub enable_cors: bool,
    pub max_request_size_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a key lookup. Values that fail to parse keep the
    /// environment default.
    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Server overrides
        if let Some(v) = lookup("CATALOG_API_HOST") {
            self.server.host = v;
        }
        if let Some(port) = ["CATALOG_API_PORT", "HTTP_PORT", "PORT"]
            .iter()
            .find_map(|key| lookup(key).and_then(|v| v.parse().ok()))
        {
            self.server.port = port;
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database.url = Some(v);
        }
        if let Some(v) = lookup("POSTGRES_HOST") {
            self.database.postgres.host = v;
        }
        if let Some(v) = lookup("POSTGRES_PORT") {
            self.database.postgres.port = v.parse().unwrap_or(self.database.postgres.port);
        }
        if let Some(v) = lookup("POSTGRES_USER") {
            self.database.postgres.user = v;
        }
        if let Some(v) = lookup("POSTGRES_PASSWORD") {
            self.database.postgres.password = v;
        }
        if let Some(v) = lookup("POSTGRES_DB") {
            self.database.postgres.database = v;
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Some(v) = lookup("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }

        // API overrides
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Some(v) = lookup("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }

        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                postgres: PostgresParts::local(),
                max_connections: 5,
                connection_timeout: 30,
                run_migrations: true,
            },
            api: ApiConfig {
                enable_request_logging: true,
                enable_cors: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                postgres: PostgresParts::local(),
                max_connections: 10,
                connection_timeout: 10,
                run_migrations: true,
            },
            api: ApiConfig {
                enable_request_logging: true,
                enable_cors: true,
                max_request_size_bytes: 256 * 1024,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                postgres: PostgresParts::local(),
                max_connections: 20,
                connection_timeout: 5,
                run_migrations: false,
            },
            api: ApiConfig {
                enable_request_logging: false,
                enable_cors: false,
                max_request_size_bytes: 64 * 1024,
            },
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        AppConfig::development().api
    }
}

impl PostgresParts {
    fn local() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "catalog".to_string(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
