//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::{Context, bail};
use payments_hex::{Backoff, RetryPolicy};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_attempts: u32,
    pub backoff: Backoff,
    pub attempt_timeout: Option<Duration>,
    pub default_variant: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let max_attempts: u32 = parse_or(&lookup, "PAYMENTS_MAX_ATTEMPTS", 3)?;
        if max_attempts == 0 {
            bail!("PAYMENTS_MAX_ATTEMPTS must be at least 1");
        }

        let base = Duration::from_millis(parse_or(&lookup, "PAYMENTS_BACKOFF_BASE_MS", 100)?);
        let max = Duration::from_millis(parse_or(&lookup, "PAYMENTS_BACKOFF_MAX_MS", 2000)?);
        let backoff = match lookup("PAYMENTS_BACKOFF")
            .unwrap_or_else(|| "exponential".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "fixed" => Backoff::Fixed(base),
            "exponential" => Backoff::Exponential { base, max },
            other => bail!("PAYMENTS_BACKOFF must be `fixed` or `exponential`, got `{other}`"),
        };

        let attempt_timeout = lookup("PAYMENTS_ATTEMPT_TIMEOUT_MS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .with_context(|| format!("PAYMENTS_ATTEMPT_TIMEOUT_MS is not a number: {raw}"))
            })
            .transpose()?;

        let default_variant =
            lookup("PAYMENTS_DEFAULT_VARIANT").unwrap_or_else(|| "gatewayA".to_string());

        Ok(Self {
            max_attempts,
            backoff,
            attempt_timeout,
            default_variant,
        })
    }

    /// Builds the retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        let policy = RetryPolicy::new(self.max_attempts).with_backoff(self.backoff);
        match self.attempt_timeout {
            Some(limit) => policy.with_attempt_timeout(limit),
            None => policy,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}
