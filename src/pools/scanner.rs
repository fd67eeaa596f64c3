//! The scan loop: factories, then pools, then tokens, then validation

use alloy::primitives::Address;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use crate::{
    config::Config,
    errors::{Diagnostics, ScanError, ScanResult},
    network::ChainReader,
    pools::{
        enumerate_factories, fetch_pool, read_pool_address, resolve_token, validate_pool,
        TokenCache, TokenResolution,
    },
    storage::OutputWriter,
    types::{Factory, FactoryConfig, PoolAddress, PoolOutcome},
    utils::normalize_reserve,
};

const PROGRESS_EVERY: u64 = 500;

#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub min_normalized_reserve: Decimal,
    pub max_pools_per_factory: Option<u64>,
}

impl From<&Config> for ScanSettings {
    fn from(config: &Config) -> Self {
        Self {
            min_normalized_reserve: config.min_normalized_reserve,
            max_pools_per_factory: config.max_pools_per_factory,
        }
    }
}

/// Everything accumulated over a run.
#[derive(Debug, Default)]
pub struct ScanState {
    /// Pool address to outcome, in discovery order.
    pub pools: IndexMap<Address, PoolOutcome>,
    /// Factory address to its valid pools, in discovery order.
    pub lps_per_factory: IndexMap<Address, Vec<Address>>,
    pub token_cache: TokenCache,
    pub diagnostics: Diagnostics,
    pub factories_scanned: usize,
    pub pools_seen: u64,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valid_pools(&self) -> usize {
        self.pools.values().filter(|outcome| outcome.is_valid()).count()
    }

    pub fn invalid_pools(&self) -> usize {
        self.pools.len() - self.valid_pools()
    }
}

fn reject(diagnostics: &mut Diagnostics, err: ScanError) -> PoolOutcome {
    let reason = err.to_string();
    diagnostics.record(err);
    PoolOutcome::Invalid(reason)
}

/// Fetches, enriches and validates one pool.
pub async fn scan_pool<R: ChainReader>(
    reader: &R,
    cache: &mut TokenCache,
    factory: &Factory,
    pool: Address,
    settings: &ScanSettings,
    diagnostics: &mut Diagnostics,
) -> PoolOutcome {
    let data = match fetch_pool(reader, factory.address, pool).await {
        Ok(data) => data,
        Err(e) => return reject(diagnostics, e),
    };

    let mut tokens = [None, None];
    for (position, token) in data.tokens.into_iter().enumerate() {
        match resolve_token(reader, cache, token, pool, factory.address, diagnostics).await {
            TokenResolution::Resolved(info) => tokens[position] = Some(info),
            TokenResolution::KnownInvalid => {}
            TokenResolution::FetchFailed(reason) => {
                debug!("LP {} is invalid: token{} unavailable", pool, position);
                return PoolOutcome::Invalid(reason);
            }
        }
    }
    let [token0, token1] = tokens;
    let decimals = [
        token0.as_ref().map(|t| t.decimals),
        token1.as_ref().map(|t| t.decimals),
    ];

    match validate_pool(&data, token0, token1, settings.min_normalized_reserve) {
        Ok(record) => PoolOutcome::Valid(record),
        Err(e) => {
            if matches!(e, ScanError::LowReserves { .. }) {
                debug!(
                    "{} has too little reserves ({:?} / {:?})",
                    pool,
                    decimals[0].and_then(|d| normalize_reserve(data.reserves.reserve0, d)),
                    decimals[1].and_then(|d| normalize_reserve(data.reserves.reserve1, d)),
                );
            }
            reject(diagnostics, e)
        }
    }
}

/// Walks every pool index of a factory and folds the outcomes into `state`.
pub async fn scan_factory<R: ChainReader>(
    reader: &R,
    factory: &Factory,
    settings: &ScanSettings,
    state: &mut ScanState,
) {
    let limit = settings
        .max_pools_per_factory
        .map_or(factory.pool_count, |cap| cap.min(factory.pool_count));
    if limit < factory.pool_count {
        info!("{}: scanning the first {} of {} pools", factory.name, limit, factory.pool_count);
    }

    state.lps_per_factory.entry(factory.address).or_default();

    for index in 0..limit {
        let pool = match read_pool_address(reader, factory, index, &mut state.diagnostics).await {
            PoolAddress::Address(pool) => pool,
            PoolAddress::Unreadable => continue,
        };
        state.pools_seen += 1;

        let outcome = scan_pool(
            reader,
            &mut state.token_cache,
            factory,
            pool,
            settings,
            &mut state.diagnostics,
        )
        .await;

        // a repeated pool keeps a single entry in both outputs
        let listed = state.pools.contains_key(&pool);
        if outcome.is_valid() && !listed {
            state.lps_per_factory.entry(factory.address).or_default().push(pool);
        }
        state.pools.insert(pool, outcome);

        if (index + 1) % PROGRESS_EVERY == 0 {
            info!("{}: {}/{} pools scanned", factory.name, index + 1, limit);
        }
    }

    let valid = state.lps_per_factory.get(&factory.address).map_or(0, Vec::len);
    info!(
        "✅ {} currently has {} liquidity pools ({} valid)",
        factory.name, factory.pool_count, valid
    );
}

/// Runs the whole scan, checkpointing the output files after every factory.
pub async fn run_scan<R: ChainReader>(
    reader: &R,
    factories: &[FactoryConfig],
    settings: &ScanSettings,
    writer: &OutputWriter,
) -> ScanResult<ScanState> {
    let mut state = ScanState::new();

    let bound = enumerate_factories(reader, factories, &mut state.diagnostics).await;
    if bound.is_empty() {
        warn!("⚠️ No factory could be scanned");
    }

    for factory in &bound {
        info!("🔍 Scanning {} ({})", factory.name, factory.address);
        scan_factory(reader, factory, settings, &mut state).await;
        state.factories_scanned += 1;
        writer.write_snapshot(&state)?;
    }

    writer.write_snapshot(&state)?;
    Ok(state)
}
