//! Token metadata fetching with a run-wide cache

use alloy::primitives::Address;
use anyhow::Result;
use std::collections::HashMap;
use tracing::debug;
use crate::{
    errors::{Diagnostics, ScanError},
    network::ChainReader,
    types::{TokenInfo, TokenMetadata},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedToken {
    Valid(TokenMetadata),
    Invalid,
}

/// Every token looked up during the run, valid or not.
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: HashMap<Address, CachedToken>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, token: &Address) -> Option<&CachedToken> {
        self.entries.get(token)
    }

    pub fn insert(&mut self, token: Address, entry: CachedToken) {
        self.entries.insert(token, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn invalid_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry, CachedToken::Invalid))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenResolution {
    Resolved(TokenInfo),
    /// Cached as invalid by an earlier pool.
    KnownInvalid,
    /// Fetched now and failed; carries the reason.
    FetchFailed(String),
}

pub async fn fetch_token_metadata<R: ChainReader>(reader: &R, token: Address) -> Result<TokenMetadata> {
    debug!("Fetching ERC-20 metadata for {}", token);
    let symbol = reader.symbol(token).await?;
    let name = reader.name(token).await?;
    let decimals = reader.decimals(token).await?;

    Ok(TokenMetadata { symbol, name, decimals })
}

/// Resolves a pool's token through the cache, fetching it at most once per run.
pub async fn resolve_token<R: ChainReader>(
    reader: &R,
    cache: &mut TokenCache,
    token: Address,
    pool: Address,
    factory: Address,
    diagnostics: &mut Diagnostics,
) -> TokenResolution {
    match cache.get(&token) {
        Some(CachedToken::Valid(metadata)) => return TokenResolution::Resolved(TokenInfo::new(token, metadata)),
        Some(CachedToken::Invalid) => return TokenResolution::KnownInvalid,
        None => {}
    }

    match fetch_token_metadata(reader, token).await {
        Ok(metadata) => {
            let info = TokenInfo::new(token, &metadata);
            cache.insert(token, CachedToken::Valid(metadata));
            TokenResolution::Resolved(info)
        }
        Err(e) => {
            cache.insert(token, CachedToken::Invalid);
            let err = ScanError::TokenMetadata {
                token,
                pool,
                factory,
                message: format!("{:#}", e),
            };
            let reason = err.to_string();
            diagnostics.record(err);
            TokenResolution::FetchFailed(reason)
        }
    }
}
