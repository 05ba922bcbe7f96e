//! Normalization of cleaned chain records.
//!
//! This module handles:
//! - Rescaling USD columns to billions, rounded to two decimals
//! - Replacing the `projects` literal with a scalar count
//! - Dropping address/pool-identifier columns from the output shape
//! - Attaching the source chain label

pub mod projects;

pub use projects::parse_project_list;

use crate::loader::schema::{Chain, ChainRecord};
use crate::utils::config::{ROUND_SCALE, USD_TO_BILLIONS_DIVISOR};
use crate::utils::error::NormalizeError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// A chain record rescaled to billions of USD with derived fields attached.
///
/// Address and pool-identifier columns are intentionally absent: they are
/// not needed for analysis and are dropped here rather than carried along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Source chain, propagated from the caller, never inferred from data
    pub chain: Chain,

    /// Token-pair identity
    pub token_pair: String,

    /// Volumes in billions of USD, rounded to two decimals
    pub all_time_volume: f64,
    pub one_day_volume: f64,
    pub seven_day_volume: f64,
    pub thirty_day_volume: f64,

    /// Liquidity in billions of USD, rounded to two decimals
    pub usd_liquidity: f64,

    /// Number of projects in the parsed collection
    pub project_count: u32,
}

/// Rescale a raw USD value into billions, rounded to two decimals.
///
/// Rounding is half away from zero (`f64::round`). The value is scaled into
/// hundredths of a billion *before* rounding so that inputs exactly at the
/// .005 boundary stay exact: 5_000_000 USD scales to 0.5 hundredths and
/// rounds up to 0.01 billions.
pub fn rescale(value: f64) -> f64 {
    (value * ROUND_SCALE / USD_TO_BILLIONS_DIVISOR).round() / ROUND_SCALE
}

/// Normalize one chain's cleaned records
///
/// **Public** - main entry point for normalization
///
/// # Arguments
/// * `chain` - Source chain label to attach
/// * `records` - Cleaned records from the loader
///
/// # Errors
/// * `NormalizeError::MalformedProjectsField` - The `projects` field of some
///   row is not a valid collection literal. This is never coerced to zero.
pub fn normalize(
    chain: Chain,
    records: &[ChainRecord],
) -> Result<Vec<NormalizedRecord>, NormalizeError> {
    debug!("Normalizing {} records for {}", records.len(), chain.label());

    records
        .iter()
        .enumerate()
        .map(|(row, record)| normalize_record(chain, row, record))
        .collect()
}

/// Normalize a single record
///
/// **Private** - internal conversion
fn normalize_record(
    chain: Chain,
    row: usize,
    record: &ChainRecord,
) -> Result<NormalizedRecord, NormalizeError> {
    let project_list = parse_project_list(&record.projects).map_err(|reason| {
        NormalizeError::MalformedProjectsField { row, reason }
    })?;

    let normalized = NormalizedRecord {
        chain,
        token_pair: record.token_pair.clone(),
        all_time_volume: rescale(record.all_time_volume),
        one_day_volume: rescale(record.one_day_volume),
        seven_day_volume: rescale(record.seven_day_volume),
        thirty_day_volume: rescale(record.thirty_day_volume),
        usd_liquidity: rescale(record.usd_liquidity),
        project_count: project_list.len() as u32,
    };

    let usd_fields = [
        normalized.all_time_volume,
        normalized.one_day_volume,
        normalized.seven_day_volume,
        normalized.thirty_day_volume,
        normalized.usd_liquidity,
    ];
    if usd_fields.iter().any(|v| *v < 0.0) {
        warn!(
            "{} row {}: negative value after rescale ({})",
            chain.label(),
            row,
            record.token_pair
        );
    }

    Ok(normalized)
}
