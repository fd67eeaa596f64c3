//! Scanner configuration settings and environment variable handling

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use crate::{
    errors::{ScanError, ScanResult},
    types::{builtin_factories, FactoryConfig},
};

// Configuration constants
pub const DEFAULT_NETWORK: &str = "mainnet";
pub const DEFAULT_MIN_NORMALIZED_RESERVE: Decimal = dec!(1);
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_RPC_MAX_ATTEMPTS: u32 = 1;
pub const MAX_RPC_ATTEMPTS: u32 = 10;
pub const DEFAULT_RPC_RETRY_DELAY_MS: u64 = 200;

#[derive(Debug, Clone)]
pub struct Config {
    pub network: String,
    pub rpc_url: Option<String>,
    pub alchemy_api_key: Option<String>,
    pub factories: Vec<FactoryConfig>,
    // Filtering
    pub min_normalized_reserve: Decimal,
    pub max_pools_per_factory: Option<u64>,
    // RPC
    pub rpc_max_attempts: u32,
    pub rpc_retry_delay_ms: u64,
    // Output
    pub output_dir: PathBuf,
    pub json_logs: bool,
}

impl Config {
    pub fn load() -> Self {
        let network = env::var("NETWORK").unwrap_or_else(|_| DEFAULT_NETWORK.to_string());
        let factories = factories_or_default(env::var("FACTORIES").ok().as_deref(), &network);

        Self {
            rpc_url: env::var("RPC_URL").ok().filter(|s| !s.trim().is_empty()),
            alchemy_api_key: env::var("ALCHEMY_API_KEY").ok(),
            factories,
            min_normalized_reserve: env::var("MIN_NORMALIZED_RESERVE")
                .ok()
                .and_then(|s| Decimal::from_str(&s).ok())
                .filter(|d| !d.is_sign_negative())
                .unwrap_or(DEFAULT_MIN_NORMALIZED_RESERVE),
            max_pools_per_factory: env::var("MAX_POOLS_PER_FACTORY")
                .ok()
                .and_then(|s| s.parse().ok()),
            rpc_max_attempts: env::var("RPC_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RPC_MAX_ATTEMPTS)
                .max(1)
                .min(MAX_RPC_ATTEMPTS),
            rpc_retry_delay_ms: env::var("RPC_RETRY_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RPC_RETRY_DELAY_MS),
            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            json_logs: env::var("LOG_FORMAT")
                .map(|s| s.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            network,
        }
    }

    /// JSON-RPC endpoint: `RPC_URL` wins, otherwise the Alchemy URL for the network.
    pub fn resolve_rpc_url(&self) -> ScanResult<String> {
        if let Some(url) = &self.rpc_url {
            return Ok(url.clone());
        }

        let key = self.alchemy_api_key.as_ref().ok_or_else(|| {
            ScanError::Config("either RPC_URL or ALCHEMY_API_KEY must be set".to_string())
        })?;
        let host = match self.network.as_str() {
            "mainnet" => "eth-mainnet",
            "base" => "base-mainnet",
            other => {
                return Err(ScanError::Config(format!(
                    "no Alchemy endpoint known for network {other}, set RPC_URL"
                )));
            }
        };
        Ok(format!("https://{}.g.alchemy.com/v2/{}", host, key))
    }
}

pub fn default_factories(network: &str) -> Vec<FactoryConfig> {
    builtin_factories(network)
        .unwrap_or_default()
        .iter()
        .map(|(name, address)| FactoryConfig::new(*name, *address))
        .collect()
}

/// `FACTORIES` override, falling back to the network's table when unset or blank.
pub fn factories_or_default(raw: Option<&str>, network: &str) -> Vec<FactoryConfig> {
    raw.map(parse_factories)
        .filter(|factories| !factories.is_empty())
        .unwrap_or_else(|| default_factories(network))
}

/// Parses `name=0xaddr,name=0xaddr`. Addresses are kept as text so a bad
/// one surfaces later as a factory bind failure rather than a startup error.
pub fn parse_factories(raw: &str) -> Vec<FactoryConfig> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((name, address)) => FactoryConfig::new(name.trim(), address.trim()),
            None => FactoryConfig::new(entry, entry),
        })
        .collect()
}
