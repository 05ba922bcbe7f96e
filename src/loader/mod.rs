//! Loading of per-chain CSV snapshots.
//!
//! This module handles:
//! - Reading one CSV file per known chain
//! - Validating the expected column set
//! - Scrubbing non-finite values and forward-filling gaps
//! - Reporting leading gaps as data-quality flags

pub mod csv_file;
pub mod preprocess;
pub mod schema;

// Re-export main types
pub use csv_file::read_chain_file;
pub use preprocess::{preprocess, QualityFlag};
pub use schema::{Chain, ChainRecord};

use crate::utils::error::LoadError;
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::Path;

/// One chain's cleaned table plus the quality flags raised while cleaning it
#[derive(Debug, Clone)]
pub struct LoadedChain {
    pub chain: Chain,
    pub records: Vec<ChainRecord>,
    pub flags: Vec<QualityFlag>,
}

/// Load and preprocess the snapshot file for a single chain
///
/// **Public** - main entry point for loading
///
/// # Arguments
/// * `data_dir` - Directory containing `dex_pairs_<chain>.csv` files
/// * `chain` - Chain whose file should be read
///
/// # Errors
/// * `LoadError::DataUnavailable` - File unreadable, required column missing,
///   or a row failed to parse (malformed input is fatal, never skipped)
pub fn load_chain(data_dir: impl AsRef<Path>, chain: Chain) -> Result<LoadedChain, LoadError> {
    let path = data_dir.as_ref().join(chain.file_name());
    debug!("Loading {} snapshot from {}", chain.label(), path.display());

    let raw_rows = read_chain_file(&path)?;
    let (records, flags) = preprocess(chain, raw_rows);

    info!(
        "Loaded {}: {} records, {} quality flags",
        chain.label(),
        records.len(),
        flags.len()
    );

    Ok(LoadedChain {
        chain,
        records,
        flags,
    })
}

/// Load every known chain from a data directory
///
/// **Public** - called once per batch run
///
/// Returns a mapping keyed by chain; keys are unique by construction
/// (one file per chain, each loaded exactly once).
pub fn load_all_chains(
    data_dir: impl AsRef<Path>,
) -> Result<BTreeMap<Chain, LoadedChain>, LoadError> {
    let data_dir = data_dir.as_ref();
    let mut tables = BTreeMap::new();

    for &chain in Chain::ALL {
        let loaded = load_chain(data_dir, chain)?;
        tables.insert(chain, loaded);
    }

    Ok(tables)
}
