//! Application configuration, loaded from the environment.
//!
//! Every setting has a matching environment variable and a sensible default,
//! so the binary runs with no flags at all in development and is driven
//! entirely by the environment in deployment.

use std::time::Duration;

use clap::{Args, Parser};

/// Top-level configuration for the scan station service.
#[derive(Debug, Clone, Parser)]
#[command(name = "packscan", version, about = "Warehouse scan station for shipment orders")]
pub struct Config {
    #[command(flatten)]
    pub http: HttpConfig,

    #[command(flatten)]
    pub mongo: MongoConfig,

    #[command(flatten)]
    pub app: AppConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Args)]
pub struct HttpConfig {
    /// Interface to bind the HTTP server to.
    #[arg(long = "http-hostname", env = "HTTP_HOSTNAME", default_value = "0.0.0.0")]
    pub hostname: String,

    /// Port to listen on.
    #[arg(long = "http-port", env = "HTTP_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Basic auth username. Auth is enabled only when both the user and the
    /// password are set.
    #[arg(long = "http-auth-user", env = "HTTP_AUTH_USER")]
    pub auth_user: Option<String>,

    /// Basic auth password.
    #[arg(long = "http-auth-password", env = "HTTP_AUTH_PASSWORD")]
    pub auth_password: Option<String>,
}

/// MongoDB connection configuration.
#[derive(Debug, Clone, Args)]
pub struct MongoConfig {
    /// Connection string for the deployment.
    #[arg(
        long = "mongo-url",
        env = "MONGO_URL",
        default_value = "mongodb://localhost:27017"
    )]
    pub url: String,

    /// Database holding the orders collection.
    #[arg(long = "mongo-db", env = "MONGO_DB", default_value = "scanner")]
    pub database: String,

    /// Per-call deadline for store operations, in seconds.
    #[arg(long = "mongo-timeout", env = "MONGO_TIMEOUT", default_value_t = 5)]
    pub timeout_secs: u64,
}

impl MongoConfig {
    /// The per-call store deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Application identity configuration.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Site name shown in rendered pages.
    #[arg(long = "app-name", env = "APP_NAME", default_value = "Package Scanner")]
    pub name: String,
}

impl Default for Config {
    /// Defaults as if launched with no arguments. Environment variables
    /// still apply, exactly as in a real launch.
    fn default() -> Self {
        Self::parse_from(["packscan"])
    }
}
