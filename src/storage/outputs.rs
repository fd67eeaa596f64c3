//! JSON output files

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::{
    errors::{ScanError, ScanResult},
    pools::ScanState,
    storage::ScanSummary,
};

pub const LP_DICTIONARY_FILE: &str = "lp_dictionary.json";
pub const LPS_PER_DEX_FILE: &str = "lps_per_dex.json";
pub const INVALID_ADDRESSES_FILE: &str = "invalid_addresses.json";
pub const SCAN_SUMMARY_FILE: &str = "scan_summary.json";

const INDENT: &[u8] = b"   ";

pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>) -> ScanResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| ScanError::Output {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Overwrites the pool dictionary, the per-factory index and the diagnostics.
    pub fn write_snapshot(&self, state: &ScanState) -> ScanResult<()> {
        write_json(&self.dir.join(LP_DICTIONARY_FILE), &state.pools)?;
        write_json(&self.dir.join(LPS_PER_DEX_FILE), &state.lps_per_factory)?;
        write_json(&self.dir.join(INVALID_ADDRESSES_FILE), state.diagnostics.entries())?;

        debug!(
            pools = state.pools.len(),
            diagnostics = state.diagnostics.len(),
            "Wrote scan snapshot to {}",
            self.dir.display()
        );
        Ok(())
    }

    pub fn write_summary(&self, summary: &ScanSummary) -> ScanResult<()> {
        let path = self.dir.join(SCAN_SUMMARY_FILE);
        write_json(&path, summary)?;

        info!(
            run_id = %summary.run_id,
            valid_pools = summary.valid_pools,
            "Saved scan summary to {}",
            path.display()
        );
        Ok(())
    }
}

/// Writes through a temp file and renames so readers never see a partial file.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> ScanResult<()> {
    let output_error = |source: std::io::Error| ScanError::Output {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| output_error(std::io::Error::other(e)))?;
    buf.push(b'\n');

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &buf).map_err(output_error)?;
    fs::rename(&tmp, path).map_err(output_error)?;
    Ok(())
}
