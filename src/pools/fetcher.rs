//! Pool address and pool state fetching

use alloy::primitives::Address;
use tracing::debug;
use crate::{
    errors::{Diagnostics, ScanError, ScanResult},
    network::ChainReader,
    types::{Factory, PoolAddress, PoolData},
};

/// Reads `allPairs(index)`; a failed read is recorded and reported as `Unreadable`.
pub async fn read_pool_address<R: ChainReader>(
    reader: &R,
    factory: &Factory,
    index: u64,
    diagnostics: &mut Diagnostics,
) -> PoolAddress {
    match reader.all_pairs(factory.address, index).await {
        Ok(address) => PoolAddress::Address(address),
        Err(e) => {
            diagnostics.record(ScanError::PoolIndex {
                factory: factory.address,
                index,
                message: format!("{:#}", e),
            });
            PoolAddress::Unreadable
        }
    }
}

/// Fetches the token pair and reserves of a pool.
pub async fn fetch_pool<R: ChainReader>(
    reader: &R,
    factory_address: Address,
    pool: Address,
) -> ScanResult<PoolData> {
    debug!("Fetching pool data for {}", pool);
    let pool_error = |e: anyhow::Error| ScanError::PoolData {
        pool,
        factory: factory_address,
        message: format!("{:#}", e),
    };

    let token0 = reader.token0(pool).await.map_err(pool_error)?;
    let token1 = reader.token1(pool).await.map_err(pool_error)?;
    let reserves = reader.reserves(pool).await.map_err(pool_error)?;

    Ok(PoolData {
        lp_address: pool,
        factory_address,
        tokens: [token0, token1],
        reserves,
    })
}
