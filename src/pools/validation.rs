//! Pool validation: token presence and minimum liquidity

use rust_decimal::Decimal;
use crate::{
    errors::{ScanError, ScanResult},
    types::{PoolData, PoolRecord, TokenInfo},
    utils::meets_min_reserve,
};

/// Turns fetched pool data into a record, or the reason it was rejected.
pub fn validate_pool(
    data: &PoolData,
    token0: Option<TokenInfo>,
    token1: Option<TokenInfo>,
    min_normalized_reserve: Decimal,
) -> ScanResult<PoolRecord> {
    let missing = |position: usize| ScanError::MissingToken {
        token: data.tokens[position],
        pool: data.lp_address,
        factory: data.factory_address,
    };
    let token0 = token0.ok_or_else(|| missing(0))?;
    let token1 = token1.ok_or_else(|| missing(1))?;

    let enough0 = meets_min_reserve(data.reserves.reserve0, token0.decimals, min_normalized_reserve);
    let enough1 = meets_min_reserve(data.reserves.reserve1, token1.decimals, min_normalized_reserve);
    if !enough0 || !enough1 {
        return Err(ScanError::LowReserves {
            pool: data.lp_address,
            factory: data.factory_address,
        });
    }

    Ok(PoolRecord::new(data, token0, token1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PoolReserves;
    use alloy::primitives::{Address, address};
    use rust_decimal_macros::dec;

    const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
    const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

    fn pool(reserve0: u128, reserve1: u128) -> PoolData {
        PoolData {
            lp_address: address!("B4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc"),
            factory_address: address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
            tokens: [USDC, WETH],
            reserves: PoolReserves {
                reserve0,
                reserve1,
                block_timestamp_last: 0,
            },
        }
    }

    fn token(address: Address, symbol: &str, decimals: u8) -> Option<TokenInfo> {
        Some(TokenInfo {
            address,
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            decimals,
        })
    }

    #[test]
    fn liquid_pool_becomes_record() {
        let data = pool(2_000_000, 3_000_000_000_000_000_000);
        let record = validate_pool(&data, token(USDC, "USDC", 6), token(WETH, "WETH", 18), dec!(1)).unwrap();

        assert_eq!(record.reserves, [2_000_000, 3_000_000_000_000_000_000]);
        assert_eq!(record.token0.symbol, "USDC");
        assert_eq!(record.token1.address, WETH);
    }

    #[test]
    fn dust_reserve_is_low_reserves() {
        let data = pool(2_000_000, 5);
        let err = validate_pool(&data, token(USDC, "USDC", 6), token(WETH, "WETH", 18), dec!(1)).unwrap_err();

        assert!(matches!(err, ScanError::LowReserves { .. }));
        assert_eq!(err.to_string(), "low reserves");
    }

    #[test]
    fn either_side_below_threshold_rejects() {
        let data = pool(999_999, 3_000_000_000_000_000_000);
        assert!(validate_pool(&data, token(USDC, "USDC", 6), token(WETH, "WETH", 18), dec!(1)).is_err());
    }

    #[test]
    fn missing_token_names_the_position() {
        let data = pool(2_000_000, 3_000_000_000_000_000_000);
        let err = validate_pool(&data, token(USDC, "USDC", 6), None, dec!(1)).unwrap_err();

        match err {
            ScanError::MissingToken { token, .. } => assert_eq!(token, WETH),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
