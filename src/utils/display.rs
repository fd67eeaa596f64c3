//! Display and printing utilities

use tracing::info;
use crate::storage::ScanSummary;

pub fn print_scan_summary(summary: &ScanSummary) {
    info!("\n📊 Scan Summary ({:.2} minutes)", summary.elapsed_minutes);
    info!("   Run: {} on {}", summary.run_id, summary.network);
    info!("   🏭 FACTORIES:");
    info!("     Configured: {}", summary.factories_configured);
    info!("     Scanned: {}", summary.factories_scanned);
    info!("   💧 POOLS:");
    info!("     Seen: {}", summary.pools_seen);
    info!("     Valid: {}", summary.valid_pools);
    info!("     Invalid: {}", summary.invalid_pools);
    info!("     Valid rate: {:.1}%",
        if summary.pools_seen > 0 {
            (summary.valid_pools as f64 / summary.pools_seen as f64) * 100.0
        } else {
            0.0
        }
    );
    info!("   🪙 TOKENS:");
    info!("     Cached: {}", summary.tokens_cached);
    info!("     Invalid: {}", summary.invalid_tokens);
    info!("   ⚠️  Diagnostics recorded: {}", summary.diagnostics);
    info!("This took {:.2} minutes.", summary.elapsed_minutes);
}
