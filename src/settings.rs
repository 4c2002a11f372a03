//! Process settings read from the environment.
//!
//! A `.env` file in the working directory is honoured when present.

use std::env;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_TARIFF_CONFIG_DIR: &str = "./config/transnet_2024_25";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-05-20";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_TIMEOUT_SECONDS: u64 = 30;

/// Errors raised while reading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `GEMINI_TIMEOUT_SECONDS` is not a positive whole number.
    #[error("GEMINI_TIMEOUT_SECONDS must be a positive integer, got '{value}'")]
    InvalidTimeout {
        /// The rejected value.
        value: String,
    },

    /// `APP_PORT` is not a valid port number.
    #[error("APP_PORT must be a valid u16, got '{value}'")]
    InvalidPort {
        /// The rejected value.
        value: String,
    },

    /// `APP_HOST` is neither `localhost` nor an IP address.
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        /// The underlying parse failure.
        #[source]
        source: AddrParseError,
    },
}

/// Stage the service runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    /// Local development (the default).
    Development,
    /// Automated tests or CI.
    Test,
    /// Production deployment.
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level settings for the service.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Deployment stage, from `APP_ENV`.
    pub environment: AppEnvironment,
    /// HTTP binding.
    pub server: ServerSettings,
    /// Logging controls.
    pub telemetry: TelemetrySettings,
    /// Directory holding `tariff_book.yaml` and `tariffs.yaml`.
    pub tariff_config_dir: PathBuf,
    /// Language model access.
    pub llm: LlmSettings,
}

/// HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Host or IP address to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

/// Logging controls.
#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

/// Language model access settings.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// API key; language model features degrade gracefully without one.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Base URL of the Generative Language API.
    pub base_url: String,
    /// Per-request timeout for model calls, in seconds.
    pub timeout_seconds: u64,
}

impl AppSettings {
    /// Loads settings from `.env` and the process environment.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment = AppEnvironment::parse(&var("APP_ENV", "development"));

        let port = match lookup("APP_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| SettingsError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };

        let timeout_seconds = match lookup("GEMINI_TIMEOUT_SECONDS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or(SettingsError::InvalidTimeout { value })?,
            None => DEFAULT_GEMINI_TIMEOUT_SECONDS,
        };

        Ok(Self {
            environment,
            server: ServerSettings {
                host: var("APP_HOST", DEFAULT_HOST),
                port,
            },
            telemetry: TelemetrySettings {
                log_level: var("APP_LOG_LEVEL", DEFAULT_LOG_LEVEL),
            },
            tariff_config_dir: PathBuf::from(var("TARIFF_CONFIG_DIR", DEFAULT_TARIFF_CONFIG_DIR)),
            llm: LlmSettings {
                api_key: lookup("GOOGLE_API_KEY").filter(|key| !key.trim().is_empty()),
                model: var("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                base_url: var("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
                timeout_seconds,
            },
        })
    }
}

impl ServerSettings {
    /// Resolves the socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| SettingsError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}
