//! Configuration management for auto-missions.
//!
//! Configuration can be set via environment variables:
//! - `TOKEN_FILE` - Optional. Credential list, one bearer token per line. Defaults to `token.txt`.
//! - `PROXY_FILE` - Optional. Proxy list, one URI per line. Defaults to `proxy.txt`.
//! - `API_BASE_URL` - Optional. Remote service base URL. Defaults to `https://api.dealr.fun/v1`.
//! - `WEB_ORIGIN` - Optional. Origin/Referer presented to the service. Defaults to `https://dealr.fun`.
//! - `IP_ECHO_URL` - Optional. Public IP lookup endpoint. Defaults to `https://api.ipify.org?format=json`.
//! - `REQUEST_TIMEOUT_SECS` - Optional. Per-request timeout. Defaults to `30`.
//! - `MISSION_DELAY_MIN_MS` / `MISSION_DELAY_MAX_MS` - Optional. Delay bounds after each
//!   mission attempt. Default to `2000` / `5000`.
//! - `CYCLE_INTERVAL_SECS` - Optional. Pause between cycles. Defaults to `86400`.
//! - `USE_PROXY` - Optional. Answers the startup proxy prompt non-interactively.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::util::parse_bool;

pub const DEFAULT_API_BASE_URL: &str = "https://api.dealr.fun/v1";
pub const DEFAULT_WEB_ORIGIN: &str = "https://dealr.fun";
pub const DEFAULT_IP_ECHO_URL: &str = "https://api.ipify.org?format=json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Mission delay bounds are inverted: min {min_ms}ms > max {max_ms}ms")]
    InvertedDelay { min_ms: u64, max_ms: u64 },
}

/// Inclusive bounds for the randomized pause after each mission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub fn new(min: Duration, max: Duration) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedDelay {
                min_ms: min.as_millis() as u64,
                max_ms: max.as_millis() as u64,
            });
        }
        Ok(Self { min, max })
    }

    /// No pause at all (used by tests).
    pub fn zero() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    /// Draw a delay uniformly from `[min, max]` at millisecond resolution.
    pub fn sample(&self) -> Duration {
        use rand::Rng;

        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        if min_ms == max_ms {
            return self.min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(2000),
            max: Duration::from_millis(5000),
        }
    }
}

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the credential list
    pub token_file: PathBuf,

    /// Path of the proxy list
    pub proxy_file: PathBuf,

    /// Base URL of the remote mission service (no trailing slash)
    pub api_base_url: String,

    /// Origin header value; the Referer is derived from it
    pub web_origin: String,

    /// Endpoint answering `{"ip": "..."}` for the caller's address
    pub ip_echo_url: String,

    /// Timeout applied to every outbound request
    pub request_timeout: Duration,

    /// Pause after each mission completion attempt
    pub mission_delay: DelayRange,

    /// Pause between two full passes over the accounts
    pub cycle_interval: Duration,

    /// Pre-answered proxy prompt; `None` means ask interactively
    pub use_proxy: Option<bool>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when a numeric variable does not parse,
    /// and `ConfigError::InvertedDelay` when the delay bounds are reversed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token_file = std::env::var("TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("token.txt"));

        let proxy_file = std::env::var("PROXY_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("proxy.txt"));

        let api_base_url = std::env::var("API_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let web_origin = std::env::var("WEB_ORIGIN")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_WEB_ORIGIN.to_string());

        let ip_echo_url =
            std::env::var("IP_ECHO_URL").unwrap_or_else(|_| DEFAULT_IP_ECHO_URL.to_string());

        let request_timeout = positive_secs(
            "REQUEST_TIMEOUT_SECS",
            env_number("REQUEST_TIMEOUT_SECS", 30)?,
        )?;

        let mission_delay = DelayRange::new(
            Duration::from_millis(env_number("MISSION_DELAY_MIN_MS", 2000)?),
            Duration::from_millis(env_number("MISSION_DELAY_MAX_MS", 5000)?),
        )?;

        let cycle_interval = positive_secs(
            "CYCLE_INTERVAL_SECS",
            env_number("CYCLE_INTERVAL_SECS", 86_400)?,
        )?;

        let use_proxy = std::env::var("USE_PROXY").ok().map(|v| parse_bool(&v));

        Ok(Self {
            token_file,
            proxy_file,
            api_base_url,
            web_origin,
            ip_echo_url,
            request_timeout,
            mission_delay,
            cycle_interval,
            use_proxy,
        })
    }

    /// Create a config pointing at a custom service (useful for testing).
    ///
    /// Delays are zeroed so tests run without pauses.
    pub fn new(api_base_url: impl Into<String>, ip_echo_url: impl Into<String>) -> Self {
        Self {
            token_file: PathBuf::from("token.txt"),
            proxy_file: PathBuf::from("proxy.txt"),
            api_base_url: api_base_url.into(),
            web_origin: DEFAULT_WEB_ORIGIN.to_string(),
            ip_echo_url: ip_echo_url.into(),
            request_timeout: Duration::from_secs(5),
            mission_delay: DelayRange::zero(),
            cycle_interval: Duration::from_secs(86_400),
            use_proxy: Some(false),
        }
    }
}

fn env_number<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}

/// A zero timeout fails every request and a zero interval never sleeps.
fn positive_secs(name: &str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue(
            name.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_range_rejects_inverted_bounds() {
        let err = DelayRange::new(Duration::from_millis(10), Duration::from_millis(5)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvertedDelay {
                min_ms: 10,
                max_ms: 5
            }
        ));
    }

    #[test]
    fn delay_samples_stay_within_bounds() {
        let range = DelayRange::default();
        for _ in 0..200 {
            let d = range.sample();
            assert!(d >= Duration::from_millis(2000));
            assert!(d <= Duration::from_millis(5000));
        }
    }

    #[test]
    fn zero_delay_samples_zero() {
        assert_eq!(DelayRange::zero().sample(), Duration::ZERO);
    }

    #[test]
    fn zero_seconds_are_rejected() {
        let err = positive_secs("CYCLE_INTERVAL_SECS", 0).unwrap_err();
        match err {
            ConfigError::InvalidValue(name, reason) => {
                assert_eq!(name, "CYCLE_INTERVAL_SECS");
                assert!(reason.contains("greater than zero"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(positive_secs("REQUEST_TIMEOUT_SECS", 0).is_err());
        assert_eq!(
            positive_secs("REQUEST_TIMEOUT_SECS", 30).unwrap(),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn test_config_disables_prompt_and_delays() {
        let config = Config::new("http://127.0.0.1:1/v1", "http://127.0.0.1:1/ip");
        assert_eq!(config.use_proxy, Some(false));
        assert_eq!(config.mission_delay, DelayRange::zero());
        assert_eq!(config.web_origin, DEFAULT_WEB_ORIGIN);
    }
}
