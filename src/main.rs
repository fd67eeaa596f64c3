//! DEX LP Scanner - Main Entry Point

use dex_lp_scanner::*;
use anyhow::Result;
use chrono::Utc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = CONFIG.clone();

    // Initialize logging
    let _logging_guard = utils::setup_logging(&config.output_dir.join("logs"), config.json_logs)?;

    info!("🧭 DEX LP Scanner v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   Network: {}", config.network);
    info!("   Factories: {}", config.factories.len());
    for factory in &config.factories {
        info!("     {} = {}", factory.name, factory.address);
    }
    info!("   Min normalized reserve: {}", config.min_normalized_reserve);
    if let Some(cap) = config.max_pools_per_factory {
        info!("   Max pools per factory: {}", cap);
    }
    info!("   RPC attempts per call: {}", config.rpc_max_attempts);

    if config.factories.is_empty() {
        warn!("⚠️ No factories configured for network {}, set FACTORIES", config.network);
    }

    // Setup network provider
    let provider = network::setup_provider(&config).await?;
    let reader = network::RpcChainReader::new(provider, network::read_retry_config(&config));
    let writer = storage::OutputWriter::new(&config.output_dir)?;
    info!("📁 Writing results to {}", writer.dir().display());

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let settings = pools::ScanSettings::from(&config);

    info!("\n🚀 Starting scan {}...\n", run_id);
    let state = pools::run_scan(&reader, &config.factories, &settings, &writer)
        .instrument(info_span!("scan", %run_id))
        .await?;

    let summary = storage::ScanSummary::new(
        run_id,
        &config.network,
        started_at,
        config.factories.len(),
        &state,
    );
    writer.write_summary(&summary)?;
    utils::print_scan_summary(&summary);

    Ok(())
}
