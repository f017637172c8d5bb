//! Environment configuration for different deployment stages

use std::env;

use tracing::Level;
use wish_sync::DEFAULT_QUERY_LIMIT;

/// Public endpoint echoing the caller's IP address as `{"ip": "..."}`
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// IP echo endpoint, overridable with `IP_LOOKUP_URL`
    #[must_use]
    pub fn ip_lookup_url(&self) -> String {
        env::var("IP_LOOKUP_URL").unwrap_or_else(|_| DEFAULT_IP_LOOKUP_URL.to_string())
    }

    /// Number of recent wishes shown on the wall, overridable with `WISH_QUERY_LIMIT`.
    ///
    /// The override can lower the limit but never raise it above the default.
    #[must_use]
    pub fn wish_query_limit(&self) -> usize {
        env::var("WISH_QUERY_LIMIT")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .map_or(DEFAULT_QUERY_LIMIT, |limit| limit.min(DEFAULT_QUERY_LIMIT))
    }

    /// Default log level when `RUST_LOG` is not set
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}
