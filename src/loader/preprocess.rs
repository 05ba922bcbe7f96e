//! Preprocessing of raw rows: inf scrubbing, forward fill, gap flags.
//!
//! Mirrors the cleaning the analysis expects: positive/negative infinity
//! becomes a missing value, and missing values are filled from the previous
//! row in file order. A gap at the head of a column has no previous row to
//! fill from; such rows are excluded from the cleaned table and reported as
//! quality flags rather than silently treated as zero.

use super::csv_file::RawRecord;
use super::schema::{Chain, ChainRecord};
use crate::utils::config::NUMERIC_COLUMNS;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A data-quality problem found while cleaning one chain's table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFlag {
    pub chain: Chain,
    pub column: String,
    /// Zero-based row index in file order
    pub row: usize,
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: leading gap in '{}' at row {}",
            self.chain, self.column, self.row
        )
    }
}

/// Clean one chain's raw rows into finite-valued records
///
/// **Public** - called by the loader after CSV reading
///
/// # Returns
/// The cleaned records (rows with unresolved leading gaps excluded) and one
/// flag per unresolved gap.
pub fn preprocess(chain: Chain, raw_rows: Vec<RawRecord>) -> (Vec<ChainRecord>, Vec<QualityFlag>) {
    // Column-major view of the five numeric fields, with non-finite
    // values already scrubbed to None
    let mut columns: Vec<Vec<Option<f64>>> = (0..NUMERIC_COLUMNS.len())
        .map(|col| raw_rows.iter().map(|row| scrub(numeric_field(row, col))).collect())
        .collect();

    let scrubbed = count_scrubbed(&raw_rows, &columns);
    if scrubbed > 0 {
        warn!(
            "{}: replaced {} non-finite values with missing markers",
            chain.label(),
            scrubbed
        );
    }

    for column in &mut columns {
        forward_fill(column);
    }

    // Rows still incomplete after the fill can only be leading rows
    let mut records = Vec::with_capacity(raw_rows.len());
    let mut flags = Vec::new();

    for (row_index, raw) in raw_rows.into_iter().enumerate() {
        let values: Vec<Option<f64>> = columns.iter().map(|col| col[row_index]).collect();

        if values.iter().all(|v| v.is_some()) {
            records.push(ChainRecord {
                token_pair: raw.token_pair,
                all_time_volume: values[0].unwrap_or_default(),
                one_day_volume: values[1].unwrap_or_default(),
                seven_day_volume: values[2].unwrap_or_default(),
                thirty_day_volume: values[3].unwrap_or_default(),
                usd_liquidity: values[4].unwrap_or_default(),
                projects: raw.projects,
                token_a_address: raw.token_a_address,
                token_b_address: raw.token_b_address,
                pool_ids: raw.pool_ids,
            });
        } else {
            for (col_index, value) in values.iter().enumerate() {
                if value.is_none() {
                    let flag = QualityFlag {
                        chain,
                        column: NUMERIC_COLUMNS[col_index].to_string(),
                        row: row_index,
                    };
                    warn!("{}", flag);
                    flags.push(flag);
                }
            }
        }
    }

    debug!(
        "{}: {} rows cleaned, {} excluded",
        chain.label(),
        records.len(),
        flags.len()
    );

    (records, flags)
}

/// Pick the numeric field at `NUMERIC_COLUMNS[col]` out of a raw row
///
/// **Private** - keeps the column order in one place
fn numeric_field(row: &RawRecord, col: usize) -> Option<f64> {
    match col {
        0 => row.all_time_volume,
        1 => row.one_day_volume,
        2 => row.seven_day_volume,
        3 => row.thirty_day_volume,
        4 => row.usd_liquidity,
        _ => None,
    }
}

/// Replace non-finite values (inf, -inf, NaN) with a missing marker
///
/// **Private** - internal scrubbing
fn scrub(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Forward-fill missing values from the previous row in file order
///
/// **Private** - leading gaps (before the first present value) stay missing
fn forward_fill(column: &mut [Option<f64>]) {
    let mut last = None;
    for value in column.iter_mut() {
        match value {
            Some(v) => last = Some(*v),
            None => *value = last,
        }
    }
}

/// Count cells that were present in the raw rows but scrubbed as non-finite
///
/// **Private** - for the warn log only
fn count_scrubbed(raw_rows: &[RawRecord], columns: &[Vec<Option<f64>>]) -> usize {
    let mut count = 0;
    for (col_index, column) in columns.iter().enumerate() {
        for (row_index, value) in column.iter().enumerate() {
            let raw = numeric_field(&raw_rows[row_index], col_index);
            if raw.is_some() && value.is_none() {
                count += 1;
            }
        }
    }
    count
}
