//! Configuration for contract checks.
//!
//! The defaults point at the hosted services. Each value can be overridden
//! through an environment variable so the same checks can run against a staging
//! deployment or a local fake.

use std::env;
use std::time::Duration;

use api_client::{
    AlbumsClient, PlaceholderClient, DEFAULT_ALBUMS_BASE_URL, DEFAULT_PLACEHOLDER_BASE_URL,
    DEFAULT_REQUEST_TIMEOUT,
};

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Environment variable overriding the albums service base URL.
pub const ALBUMS_BASE_URL_VAR: &str = "ALBUMS_BASE_URL";

/// Environment variable overriding the placeholder service base URL.
pub const PLACEHOLDER_BASE_URL_VAR: &str = "PLACEHOLDER_BASE_URL";

/// Environment variable overriding the `GET /posts` latency budget.
pub const POSTS_LATENCY_BUDGET_VAR: &str = "POSTS_LATENCY_BUDGET_MS";

/// Environment variable overriding the per-request timeout.
pub const HTTP_TIMEOUT_VAR: &str = "HTTP_TIMEOUT_SECS";

/// Default latency budget for `GET /posts`.
pub const DEFAULT_POSTS_LATENCY_BUDGET: Duration = Duration::from_millis(500);

/// Settings shared by every contract check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Base URL of the albums CRUD service.
    pub albums_base_url: String,
    /// Base URL of the placeholder API.
    pub placeholder_base_url: String,
    /// Maximum acceptable wall-clock time for one `GET /posts`.
    pub posts_latency_budget: Duration,
    /// Network timeout applied to every request.
    pub request_timeout: Duration,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            albums_base_url: DEFAULT_ALBUMS_BASE_URL.to_string(),
            placeholder_base_url: DEFAULT_PLACEHOLDER_BASE_URL.to_string(),
            posts_latency_budget: DEFAULT_POSTS_LATENCY_BUDGET,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ContractConfig {
    /// Loads configuration, overlaying environment variables on the defaults.
    ///
    /// Optional environment variables:
    /// - `ALBUMS_BASE_URL`: albums service base URL
    /// - `PLACEHOLDER_BASE_URL`: placeholder API base URL
    /// - `POSTS_LATENCY_BUDGET_MS`: latency budget in milliseconds
    /// - `HTTP_TIMEOUT_SECS`: request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a numeric variable is set but does not parse,
    /// or if `HTTP_TIMEOUT_SECS` is zero. Unset or empty variables fall back to
    /// the default.
    pub fn from_env() -> Result<Self, Error> {
        let defaults = Self::default();

        let albums_base_url = read_var(ALBUMS_BASE_URL_VAR).unwrap_or(defaults.albums_base_url);
        let placeholder_base_url =
            read_var(PLACEHOLDER_BASE_URL_VAR).unwrap_or(defaults.placeholder_base_url);

        let posts_latency_budget = match read_var(POSTS_LATENCY_BUDGET_VAR) {
            Some(raw) => Duration::from_millis(parse_number(POSTS_LATENCY_BUDGET_VAR, &raw)?),
            None => defaults.posts_latency_budget,
        };

        let request_timeout = match read_var(HTTP_TIMEOUT_VAR) {
            Some(raw) => match parse_number(HTTP_TIMEOUT_VAR, &raw)? {
                0 => {
                    return Err(Error::Config(format!(
                        "{} must be at least 1 second",
                        HTTP_TIMEOUT_VAR
                    )));
                }
                secs => Duration::from_secs(secs),
            },
            None => defaults.request_timeout,
        };

        Ok(Self {
            albums_base_url,
            placeholder_base_url,
            posts_latency_budget,
            request_timeout,
        })
    }

    /// Builds an albums client for the configured service.
    pub fn albums_client(&self) -> Result<AlbumsClient, Error> {
        Ok(AlbumsClient::new(&self.albums_base_url, self.request_timeout)?)
    }

    /// Builds a placeholder client for the configured service.
    pub fn placeholder_client(&self) -> Result<PlaceholderClient, Error> {
        Ok(PlaceholderClient::new(&self.placeholder_base_url, self.request_timeout)?)
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_number(name: &str, raw: &str) -> Result<u64, Error> {
    raw.parse::<u64>()
        .map_err(|_| Error::Config(format!("{} must be a whole number, got '{}'", name, raw)))
}
