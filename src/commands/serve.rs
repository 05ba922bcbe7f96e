//! Serve command implementation.
//!
//! Loads and normalizes the chain snapshots once at startup, then serves
//! the interactive dashboard over the resulting read-only tables.

use crate::dashboard::{run_server, DashboardContext};
use crate::loader::load_all_chains;
use crate::normalizer::{normalize, NormalizedRecord};
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the serve command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ServeArgs {
    /// Directory containing the per-chain CSV snapshots
    pub data_dir: PathBuf,

    /// TCP port for the dashboard
    pub port: u16,
}

/// Execute the serve command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// Fails if any snapshot cannot be loaded or normalized, or if the port
/// cannot be bound. Bad dropdown selections at runtime do NOT end up here;
/// they are answered with an HTTP error by the server itself.
pub fn execute_serve(args: ServeArgs) -> Result<()> {
    info!("Loading chain snapshots from {}", args.data_dir.display());

    let tables = load_all_chains(&args.data_dir).context("Failed to load chain snapshots")?;

    let mut unified: Vec<NormalizedRecord> = Vec::new();
    let mut flag_count = 0;
    for (chain, loaded) in &tables {
        let normalized = normalize(*chain, &loaded.records)
            .with_context(|| format!("Failed to normalize {} records", chain))?;
        unified.extend(normalized);
        flag_count += loaded.flags.len();
    }

    if flag_count > 0 {
        warn!("{} quality flags raised during load", flag_count);
    }
    info!("Dashboard data ready: {} records", unified.len());

    let context = Arc::new(DashboardContext::new(unified));

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(run_server(context, args.port))
}
