//! Run summary written at the end of a scan

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use crate::pools::ScanState;

#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub run_id: Uuid,
    pub network: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_minutes: f64,
    pub factories_configured: usize,
    pub factories_scanned: usize,
    pub pools_seen: u64,
    pub valid_pools: usize,
    pub invalid_pools: usize,
    pub tokens_cached: usize,
    pub invalid_tokens: usize,
    pub diagnostics: usize,
}

impl ScanSummary {
    pub fn new(
        run_id: Uuid,
        network: &str,
        started_at: DateTime<Utc>,
        factories_configured: usize,
        state: &ScanState,
    ) -> Self {
        let finished_at = Utc::now();
        Self {
            run_id,
            network: network.to_string(),
            started_at,
            finished_at,
            elapsed_minutes: (finished_at - started_at).num_milliseconds() as f64 / 60_000.0,
            factories_configured,
            factories_scanned: state.factories_scanned,
            pools_seen: state.pools_seen,
            valid_pools: state.valid_pools(),
            invalid_pools: state.invalid_pools(),
            tokens_cached: state.token_cache.len(),
            invalid_tokens: state.token_cache.invalid_count(),
            diagnostics: state.diagnostics.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PoolOutcome;
    use alloy::primitives::Address;
    use chrono::Duration;

    #[test]
    fn counts_come_from_state() {
        let mut state = ScanState::new();
        state.pools.insert(Address::ZERO, PoolOutcome::Invalid("low reserves".to_string()));
        state.pools_seen = 1;
        state.factories_scanned = 1;
        let started_at = Utc::now() - Duration::minutes(3);

        let summary = ScanSummary::new(Uuid::new_v4(), "mainnet", started_at, 2, &state);

        assert_eq!(summary.factories_configured, 2);
        assert_eq!(summary.valid_pools, 0);
        assert_eq!(summary.invalid_pools, 1);
        assert!(summary.elapsed_minutes >= 3.0);
        assert!(summary.finished_at >= summary.started_at);
    }
}
