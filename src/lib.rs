//! DEX LP Scanner - enumerates Uniswap V2 style liquidity pools
//!
//! Walks every configured factory, reads each pool's token pair and reserves,
//! enriches the tokens with ERC-20 metadata, drops invalid or illiquid pools
//! and writes the results to JSON files.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod pools;
pub mod storage;
pub mod utils;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{ScanError, ScanResult};
pub use types::*;

// Type alias for our concrete provider
pub type ConcreteProvider = alloy::providers::RootProvider<alloy::transports::BoxTransport>;
