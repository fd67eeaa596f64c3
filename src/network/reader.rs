//! Contract reads used by the scanner

use alloy::{
    primitives::{Address, Bytes, U256, keccak256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
    sol_types::SolValue,
};
use anyhow::{Context, Result, anyhow};
use std::sync::Arc;
use tracing::debug;
use crate::{
    network::retry::{retry_with_backoff, RetryConfig},
    types::PoolReserves,
    ConcreteProvider,
};

/// The remote contract surface the pipeline depends on.
///
/// Factory calls follow `IUniswapV2Factory`, pool calls `IUniswapV2Pair`
/// and token calls `IERC20`.
#[allow(async_fn_in_trait)]
pub trait ChainReader {
    async fn code_at(&self, address: Address) -> Result<Bytes>;
    async fn all_pairs_length(&self, factory: Address) -> Result<u64>;
    async fn all_pairs(&self, factory: Address, index: u64) -> Result<Address>;
    async fn token0(&self, pool: Address) -> Result<Address>;
    async fn token1(&self, pool: Address) -> Result<Address>;
    async fn reserves(&self, pool: Address) -> Result<PoolReserves>;
    async fn symbol(&self, token: Address) -> Result<String>;
    async fn name(&self, token: Address) -> Result<String>;
    async fn decimals(&self, token: Address) -> Result<u8>;
}

/// `ChainReader` over a JSON-RPC provider using raw `eth_call`s.
pub struct RpcChainReader {
    provider: Arc<ConcreteProvider>,
    retry: RetryConfig,
}

impl RpcChainReader {
    pub fn new(provider: Arc<ConcreteProvider>, retry: RetryConfig) -> Self {
        Self { provider, retry }
    }

    async fn eth_call(&self, to: Address, data: Vec<u8>, what: &str) -> Result<Bytes> {
        debug!("eth_call {} on {}", what, to);
        let tx = TransactionRequest::default().to(to).input(data.into());

        retry_with_backoff(
            || async {
                self.provider
                    .call(&tx)
                    .await
                    .with_context(|| format!("{} call to {} failed", what, to))
            },
            &self.retry,
            what,
        )
        .await
        .map_err(anyhow::Error::from)
    }

    async fn call_address(&self, to: Address, signature: &str) -> Result<Address> {
        let raw = self.eth_call(to, selector(signature), signature).await?;
        Address::abi_decode(&raw, true)
            .with_context(|| format!("Failed to decode {} result", signature))
    }

    async fn call_text(&self, to: Address, signature: &str) -> Result<String> {
        let raw = self.eth_call(to, selector(signature), signature).await?;
        decode_string_or_bytes32(&raw)
            .with_context(|| format!("Failed to decode {} result", signature))
    }
}

impl ChainReader for RpcChainReader {
    async fn code_at(&self, address: Address) -> Result<Bytes> {
        retry_with_backoff(
            || async {
                self.provider
                    .get_code_at(address)
                    .await
                    .with_context(|| format!("eth_getCode for {} failed", address))
            },
            &self.retry,
            "eth_getCode",
        )
        .await
        .map_err(anyhow::Error::from)
    }

    async fn all_pairs_length(&self, factory: Address) -> Result<u64> {
        let raw = self
            .eth_call(factory, selector("allPairsLength()"), "allPairsLength()")
            .await?;
        let count = U256::abi_decode(&raw, true).context("Failed to decode allPairsLength")?;
        u64::try_from(count).map_err(|_| anyhow!("pool count {} does not fit in u64", count))
    }

    async fn all_pairs(&self, factory: Address, index: u64) -> Result<Address> {
        let mut data = selector("allPairs(uint256)");
        data.extend_from_slice(&U256::from(index).abi_encode());
        let raw = self
            .eth_call(factory, data, &format!("allPairs({})", index))
            .await?;
        Address::abi_decode(&raw, true).context("Failed to decode allPairs")
    }

    async fn token0(&self, pool: Address) -> Result<Address> {
        self.call_address(pool, "token0()").await
    }

    async fn token1(&self, pool: Address) -> Result<Address> {
        self.call_address(pool, "token1()").await
    }

    async fn reserves(&self, pool: Address) -> Result<PoolReserves> {
        let raw = self
            .eth_call(pool, selector("getReserves()"), "getReserves()")
            .await?;
        let decoded = <(U256, U256, U256)>::abi_decode(&raw, true)
            .context("Failed to decode reserves")?;
        Ok(PoolReserves {
            reserve0: u128::try_from(decoded.0)
                .map_err(|_| anyhow!("reserve0 {} exceeds uint112", decoded.0))?,
            reserve1: u128::try_from(decoded.1)
                .map_err(|_| anyhow!("reserve1 {} exceeds uint112", decoded.1))?,
            block_timestamp_last: u32::try_from(decoded.2)
                .map_err(|_| anyhow!("blockTimestampLast {} exceeds uint32", decoded.2))?,
        })
    }

    async fn symbol(&self, token: Address) -> Result<String> {
        self.call_text(token, "symbol()").await
    }

    async fn name(&self, token: Address) -> Result<String> {
        self.call_text(token, "name()").await
    }

    async fn decimals(&self, token: Address) -> Result<u8> {
        let raw = self
            .eth_call(token, selector("decimals()"), "decimals()")
            .await?;
        let decimals = U256::abi_decode(&raw, false).context("Failed to decode decimals")?;
        u8::try_from(decimals).map_err(|_| anyhow!("decimals {} out of range", decimals))
    }
}

fn selector(signature: &str) -> Vec<u8> {
    keccak256(signature)[..4].to_vec()
}

/// Decodes an ABI `string`, falling back to a NUL-padded `bytes32` as
/// returned by some older tokens.
pub fn decode_string_or_bytes32(raw: &[u8]) -> Result<String> {
    if let Ok(text) = String::abi_decode(raw, true) {
        return Ok(text);
    }

    if raw.len() == 32 {
        let end = raw.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        return String::from_utf8(raw[..end].to_vec()).context("bytes32 value is not UTF-8");
    }

    Err(anyhow!("cannot decode {} bytes as string or bytes32", raw.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_match_known_values() {
        assert_eq!(selector("getReserves()"), vec![0x09, 0x02, 0xf1, 0xac]);
        assert_eq!(selector("allPairsLength()"), vec![0x57, 0x4f, 0x2b, 0xa3]);
        assert_eq!(selector("allPairs(uint256)"), vec![0x1e, 0x3d, 0xd1, 0x8b]);
    }

    #[test]
    fn decodes_abi_string() {
        let raw = "UNI".to_string().abi_encode();
        assert_eq!(decode_string_or_bytes32(&raw).unwrap(), "UNI");
    }

    #[test]
    fn decodes_padded_bytes32() {
        let mut raw = [0u8; 32];
        raw[..3].copy_from_slice(b"MKR");
        assert_eq!(decode_string_or_bytes32(&raw).unwrap(), "MKR");
    }

    #[test]
    fn rejects_empty_return_data() {
        assert!(decode_string_or_bytes32(&[]).is_err());
    }
}
