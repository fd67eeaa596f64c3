//! Retry logic with exponential backoff

use std::time::Duration;
use anyhow::Result;
use rand::Rng;
use tracing::warn;
use crate::errors::{ScanError, ScanResult};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub exponential_base: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            exponential_base: 2.0,
        }
    }
}

impl RetryConfig {
    /// One attempt, no backoff.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }
}

/// Runs `operation` up to `config.max_attempts` times, sleeping between failures.
pub async fn retry_with_backoff<F, Fut, T>(
    operation: F,
    config: &RetryConfig,
    context: &str,
) -> ScanResult<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut delay_ms = config.initial_delay_ms;
    let mut attempt = 1;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if attempt == max_attempts {
            return Err(ScanError::Network {
                message: format!("{context} failed after {attempt} attempts"),
                source: err,
                retry_count: attempt,
            });
        }

        warn!(attempt, max_attempts, delay_ms, "{context}: {err:#}, retrying");
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        delay_ms = next_delay(config, delay_ms);
        attempt += 1;
    }
}

/// Grows the delay by `exponential_base`, caps it, then adds up to ±5% jitter.
fn next_delay(config: &RetryConfig, delay_ms: u64) -> u64 {
    let capped = (delay_ms as f64 * config.exponential_base).min(config.max_delay_ms as f64);
    let jitter = rand::rng().random_range(-0.05..=0.05);
    (capped * (1.0 + jitter)).max(0.0).round() as u64
}
