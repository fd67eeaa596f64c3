//! In-memory chain for pipeline tests

use alloy::primitives::{Address, Bytes};
use anyhow::{Result, anyhow};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use super::ChainReader;
use crate::types::{PoolReserves, TokenMetadata};

#[derive(Default)]
pub struct MockChain {
    code: HashSet<Address>,
    failing_counts: HashSet<Address>,
    factories: HashMap<Address, Vec<Option<Address>>>,
    pools: HashMap<Address, ([Address; 2], PoolReserves)>,
    tokens: HashMap<Address, TokenMetadata>,
    symbol_calls: RefCell<HashMap<Address, u32>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory; `None` entries revert on `allPairs`.
    pub fn factory(mut self, address: Address, pairs: Vec<Option<Address>>) -> Self {
        self.code.insert(address);
        self.factories.insert(address, pairs);
        self
    }

    /// A factory with code whose `allPairsLength` reverts.
    pub fn broken_factory(mut self, address: Address) -> Self {
        self.code.insert(address);
        self.failing_counts.insert(address);
        self
    }

    pub fn pool(mut self, address: Address, tokens: [Address; 2], reserves: (u128, u128)) -> Self {
        self.code.insert(address);
        self.pools.insert(
            address,
            (
                tokens,
                PoolReserves {
                    reserve0: reserves.0,
                    reserve1: reserves.1,
                    block_timestamp_last: 1_700_000_000,
                },
            ),
        );
        self
    }

    pub fn token(mut self, address: Address, symbol: &str, decimals: u8) -> Self {
        self.code.insert(address);
        self.tokens.insert(
            address,
            TokenMetadata {
                symbol: symbol.to_string(),
                name: format!("{symbol} Token"),
                decimals,
            },
        );
        self
    }

    pub fn symbol_calls(&self, token: Address) -> u32 {
        self.symbol_calls.borrow().get(&token).copied().unwrap_or(0)
    }

    fn pool_entry(&self, pool: Address) -> Result<&([Address; 2], PoolReserves)> {
        self.pools.get(&pool).ok_or_else(|| anyhow!("execution reverted"))
    }

    fn token_entry(&self, token: Address) -> Result<&TokenMetadata> {
        self.tokens.get(&token).ok_or_else(|| anyhow!("execution reverted"))
    }
}

impl ChainReader for MockChain {
    async fn code_at(&self, address: Address) -> Result<Bytes> {
        if self.code.contains(&address) {
            Ok(Bytes::from_static(&[0x60, 0x80]))
        } else {
            Ok(Bytes::new())
        }
    }

    async fn all_pairs_length(&self, factory: Address) -> Result<u64> {
        if self.failing_counts.contains(&factory) {
            return Err(anyhow!("execution reverted"));
        }
        self.factories
            .get(&factory)
            .map(|pairs| pairs.len() as u64)
            .ok_or_else(|| anyhow!("execution reverted"))
    }

    async fn all_pairs(&self, factory: Address, index: u64) -> Result<Address> {
        self.factories
            .get(&factory)
            .and_then(|pairs| pairs.get(index as usize).copied().flatten())
            .ok_or_else(|| anyhow!("execution reverted"))
    }

    async fn token0(&self, pool: Address) -> Result<Address> {
        Ok(self.pool_entry(pool)?.0[0])
    }

    async fn token1(&self, pool: Address) -> Result<Address> {
        Ok(self.pool_entry(pool)?.0[1])
    }

    async fn reserves(&self, pool: Address) -> Result<PoolReserves> {
        Ok(self.pool_entry(pool)?.1)
    }

    async fn symbol(&self, token: Address) -> Result<String> {
        *self.symbol_calls.borrow_mut().entry(token).or_insert(0) += 1;
        Ok(self.token_entry(token)?.symbol.clone())
    }

    async fn name(&self, token: Address) -> Result<String> {
        Ok(self.token_entry(token)?.name.clone())
    }

    async fn decimals(&self, token: Address) -> Result<u8> {
        Ok(self.token_entry(token)?.decimals)
    }
}
