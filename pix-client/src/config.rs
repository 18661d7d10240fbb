//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::routes::RouteStyle;

pub const BASE_URL_VAR: &str = "PIX_BCB_BASE_URL";
pub const TIMEOUT_VAR: &str = "PIX_TIMEOUT";
pub const ROUTES_VAR: &str = "PIX_ROUTES";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: &str = "5.0";
pub const DEFAULT_ROUTES: &str = "keys";

/// Error type for invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("Unknown route style {0:?}: expected \"keys\" or \"search\"")]
    UnknownRouteStyle(String),
}

/// Client configuration. Read once when the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    base_url: Url,
    timeout: Duration,
    routes: RouteStyle,
}

impl Settings {
    /// Creates settings with the default route style.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: check_timeout(timeout)?,
            routes: RouteStyle::default(),
        })
    }

    /// Loads settings from environment variables.
    ///
    /// - `PIX_BCB_BASE_URL` (default `http://127.0.0.1:5000`)
    /// - `PIX_TIMEOUT` in seconds (default `5.0`)
    /// - `PIX_ROUTES`, `keys` or `search` (default `keys`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = lookup(TIMEOUT_VAR).unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string());
        let timeout = parse_timeout_secs(&timeout)?;
        let routes: RouteStyle = lookup(ROUTES_VAR)
            .unwrap_or_else(|| DEFAULT_ROUTES.to_string())
            .parse()?;

        Ok(Self::new(&base_url, timeout)?.with_routes(routes))
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        self.timeout = check_timeout(timeout)?;
        Ok(self)
    }

    /// Overrides the route style.
    pub fn with_routes(mut self, routes: RouteStyle) -> Self {
        self.routes = routes;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn routes(&self) -> RouteStyle {
        self.routes
    }
}

/// Parses a timeout given in (possibly fractional) seconds.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))?;
    let timeout = Duration::try_from_secs_f64(secs)
        .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))?;
    check_timeout(timeout)
}

fn check_timeout(timeout: Duration) -> Result<Duration, ConfigError> {
    if timeout.is_zero() {
        return Err(ConfigError::InvalidTimeout(format!("{timeout:?}")));
    }
    Ok(timeout)
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    Ok(url)
}
