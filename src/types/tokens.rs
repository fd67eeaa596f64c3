//! ERC-20 token metadata types

use alloy::primitives::Address;
use serde::Serialize;

/// What `symbol()`, `name()` and `decimals()` returned for a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

/// Token metadata attached to a pool record under `token0` / `token1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(address: Address, metadata: &TokenMetadata) -> Self {
        Self {
            address,
            symbol: metadata.symbol.clone(),
            name: metadata.name.clone(),
            decimals: metadata.decimals,
        }
    }
}
