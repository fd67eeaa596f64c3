//! Network provider setup

use alloy::providers::{Provider, ProviderBuilder};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use crate::{
    config::Config,
    network::retry::{retry_with_backoff, RetryConfig},
    ConcreteProvider,
};

pub async fn setup_provider(config: &Config) -> Result<Arc<ConcreteProvider>> {
    let rpc_url = config.resolve_rpc_url()?;

    let provider: Arc<ConcreteProvider> = Arc::new(
        ProviderBuilder::new()
            .on_http(rpc_url.parse().context("RPC URL is not a valid URL")?)
            .boxed()
    );

    info!("🔗 Testing connection to {} network...", config.network);
    let block = retry_with_backoff(
        || async {
            provider.get_block_number().await
                .context("Failed to get block number")
        },
        &RetryConfig {
            max_attempts: 5,
            initial_delay_ms: 500,
            max_delay_ms: 10000,
            exponential_base: 2.0,
        },
        "RPC connection",
    ).await
    .map_err(|e| {
        warn!("⚠️ Network connection attempt failed: {}", e);
        anyhow::anyhow!("Network connection failed: {}", e)
    })?;

    info!("✅ Connected to {} at block {}", config.network, block);
    Ok(provider)
}

/// Retry policy for contract reads, from `RPC_MAX_ATTEMPTS` / `RPC_RETRY_DELAY_MS`.
pub fn read_retry_config(config: &Config) -> RetryConfig {
    RetryConfig {
        max_attempts: config.rpc_max_attempts,
        initial_delay_ms: config.rpc_retry_delay_ms,
        ..Default::default()
    }
}
