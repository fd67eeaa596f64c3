//! Factory and pool types

use alloy::primitives::Address;
use serde::{Serialize, Serializer};
use super::TokenInfo;

/// A factory entry as configured: the address is still unparsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryConfig {
    pub name: String,
    pub address: String,
}

impl FactoryConfig {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// A bound factory with its pool count read once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factory {
    pub name: String,
    pub address: Address,
    pub pool_count: u64,
}

/// Result of reading `allPairs(index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolAddress {
    Address(Address),
    Unreadable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolReserves {
    pub reserve0: u128,
    pub reserve1: u128,
    pub block_timestamp_last: u32,
}

/// Raw pool state as fetched, before token metadata is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolData {
    pub lp_address: Address,
    pub factory_address: Address,
    pub tokens: [Address; 2],
    pub reserves: PoolReserves,
}

/// A pool that passed validation, as written to `lp_dictionary.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolRecord {
    pub lp_address: Address,
    pub tokens: [Address; 2],
    pub reserves: [u128; 2],
    pub block_timestamp_last: u32,
    pub factory_address: Address,
    pub token0: TokenInfo,
    pub token1: TokenInfo,
}

impl PoolRecord {
    pub fn new(data: &PoolData, token0: TokenInfo, token1: TokenInfo) -> Self {
        Self {
            lp_address: data.lp_address,
            tokens: data.tokens,
            reserves: [data.reserves.reserve0, data.reserves.reserve1],
            block_timestamp_last: data.reserves.block_timestamp_last,
            factory_address: data.factory_address,
            token0,
            token1,
        }
    }
}

/// Final state of a pool. Serializes as the record, or `false` when invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolOutcome {
    Valid(PoolRecord),
    Invalid(String),
}

impl PoolOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, PoolOutcome::Valid(_))
    }
}

impl Serialize for PoolOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PoolOutcome::Valid(record) => record.serialize(serializer),
            PoolOutcome::Invalid(_) => serializer.serialize_bool(false),
        }
    }
}
