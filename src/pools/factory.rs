//! Factory binding and pool count enumeration

use alloy::primitives::Address;
use std::str::FromStr;
use tracing::info;
use crate::{
    errors::{Diagnostics, ScanError, ScanResult},
    network::ChainReader,
    types::{Factory, FactoryConfig},
};

/// Parses the configured address and checks that a contract is deployed there.
pub async fn bind_factory<R: ChainReader>(reader: &R, config: &FactoryConfig) -> ScanResult<Address> {
    let bind_error = |message: String| ScanError::FactoryBind {
        name: config.name.clone(),
        address: config.address.clone(),
        message,
    };

    let address = Address::from_str(config.address.trim())
        .map_err(|e| bind_error(format!("invalid address: {}", e)))?;
    let code = reader
        .code_at(address)
        .await
        .map_err(|e| bind_error(format!("{:#}", e)))?;
    if code.is_empty() {
        return Err(bind_error("no contract code deployed at address".to_string()));
    }

    Ok(address)
}

/// Binds every configured factory and reads its pool count. Factories that
/// fail either step are left out and recorded in `diagnostics`.
pub async fn enumerate_factories<R: ChainReader>(
    reader: &R,
    configs: &[FactoryConfig],
    diagnostics: &mut Diagnostics,
) -> Vec<Factory> {
    let mut factories = Vec::with_capacity(configs.len());

    for config in configs {
        let address = match bind_factory(reader, config).await {
            Ok(address) => address,
            Err(e) => {
                diagnostics.record(e);
                continue;
            }
        };

        match reader.all_pairs_length(address).await {
            Ok(pool_count) => {
                info!("🏭 {} ({}) lists {} pools", config.name, address, pool_count);
                factories.push(Factory {
                    name: config.name.clone(),
                    address,
                    pool_count,
                });
            }
            Err(e) => diagnostics.record(ScanError::PoolCount {
                name: config.name.clone(),
                factory: address,
                message: format!("{:#}", e),
            }),
        }
    }

    factories
}
