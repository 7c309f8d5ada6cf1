//! Environment configuration, read once at startup.

use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_PUBLIC_WEB_BASE_URL: &str = "http://localhost:5173";
const DEFAULT_BYPASS_CODE: &str = "safe";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// `PostgreSQL` URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Base of the share URLs handed out on publish, without trailing `/`.
    pub public_web_base_url: String,
    /// Code that opens time-locked post-its early.
    pub bypass_code: String,
    /// Single allowed CORS origin; any origin when absent.
    pub cors_origin: Option<String>,
    /// OTLP gRPC endpoint for trace export.
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            database_url: get("DATABASE_URL"),
            public_web_base_url: get("PUBLIC_WEB_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PUBLIC_WEB_BASE_URL.to_owned())
                .trim_end_matches('/')
                .to_owned(),
            bypass_code: get("HUNT_BYPASS_CODE").unwrap_or_else(|| DEFAULT_BYPASS_CODE.to_owned()),
            cors_origin: get("CORS_ORIGIN"),
            otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
