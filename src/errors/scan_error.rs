//! Custom error types for the scanner

use alloy::primitives::Address;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("factory {name} at {address} could not be bound: {message}")]
    FactoryBind {
        name: String,
        address: String,
        message: String,
    },

    #[error("factory {name} ({factory}) pool count could not be read: {message}")]
    PoolCount {
        name: String,
        factory: Address,
        message: String,
    },

    #[error("factory {factory} allPairs({index}) failed: {message}")]
    PoolIndex {
        factory: Address,
        index: u64,
        message: String,
    },

    #[error("pool data query failed for {pool}: {message}")]
    PoolData {
        pool: Address,
        factory: Address,
        message: String,
    },

    #[error("token metadata query failed for {token} (pool {pool}): {message}")]
    TokenMetadata {
        token: Address,
        pool: Address,
        factory: Address,
        message: String,
    },

    #[error("low reserves")]
    LowReserves {
        pool: Address,
        factory: Address,
    },

    #[error("missing token data for {token} in pool {pool}")]
    MissingToken {
        token: Address,
        pool: Address,
        factory: Address,
    },

    #[error("RPC error: {message}")]
    Network {
        message: String,
        #[source]
        source: anyhow::Error,
        retry_count: u32,
    },

    #[error("failed to write {path}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ScanError {
    /// Errors that invalidate a single factory, pool or token without
    /// stopping the run.
    pub fn is_per_entity(&self) -> bool {
        !matches!(
            self,
            ScanError::Network { .. } | ScanError::Output { .. } | ScanError::Config(_)
        )
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
