//! # Client Configuration
//!
//! Configuration is read from environment variables (a `.env` file is loaded
//! by the binary before this runs) and validated up front so a bad value
//! fails at startup rather than on the first request.
//!
//! | Variable                   | Default                                            |
//! |----------------------------|----------------------------------------------------|
//! | `MINERX_API_URL`           | `https://backendminingx-production.up.railway.app` |
//! | `MINERX_TIMEOUT_SECS`      | `10`                                               |
//! | `MINERX_RETRY_MAX`         | `3`                                                |
//! | `MINERX_RETRY_BASE_MS`     | `2000`                                             |
//! | `MINERX_RETRY_FACTOR`      | `2`                                                |
//! | `MINERX_STATE_FILE`        | `.minerx/state.json`                               |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::services::api::RetryPolicy;

pub const DEFAULT_API_URL: &str = "https://backendminingx-production.up.railway.app";
pub const DEFAULT_STATE_FILE: &str = ".minerx/state.json";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub api_base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Retry policy for idempotent reads
    pub retry: RetryPolicy,
    /// Where the persisted slices are written
    pub state_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let api_base_url = env::var("MINERX_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let request_timeout = env_parse::<u64>("MINERX_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let retry = RetryPolicy {
            max_retries: env_parse("MINERX_RETRY_MAX")?.unwrap_or(defaults.retry.max_retries),
            base_delay: env_parse::<u64>("MINERX_RETRY_BASE_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry.base_delay),
            factor: env_parse("MINERX_RETRY_FACTOR")?.unwrap_or(defaults.retry.factor),
        };

        let state_file = env::var("MINERX_STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.state_file);

        let config = Self {
            api_base_url,
            request_timeout,
            retry,
            state_file,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "MINERX_API_URL must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(AppError::Config("MINERX_TIMEOUT_SECS must be at least 1".to_string()));
        }

        if self.retry.max_retries > 10 {
            return Err(AppError::Config("MINERX_RETRY_MAX must be between 0 and 10".to_string()));
        }

        if self.retry.factor == 0 {
            return Err(AppError::Config("MINERX_RETRY_FACTOR must be at least 1".to_string()));
        }

        Ok(())
    }
}

fn env_parse<T: FromStr>(name: &'static str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} has an invalid value '{}'", name, raw))),
        Err(_) => Ok(None),
    }
}
