//! Aggregation of normalized records into per-chain statistics.
//!
//! This module transforms the unified cross-chain table into:
//! - Per-chain means of volumes, liquidity and project counts
//! - A volatility proxy (`volume_std`)
//! - A market-depth proxy (`liquidity_ratio`)

pub mod metrics;

// Re-export main types and functions
pub use metrics::{aggregate, aggregate_group, volume_dispersion, ChainAggregate};
