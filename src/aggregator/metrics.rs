//! Per-chain aggregate metrics over the unified table.
//!
//! Groups normalized records by chain and computes mean statistics plus two
//! derived ratios. The grouping is a partition: every record belongs to
//! exactly one aggregate row, and one aggregate row exists per distinct
//! chain present.

use crate::loader::schema::Chain;
use crate::normalizer::NormalizedRecord;
use crate::utils::error::AggregateError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the per-chain aggregate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainAggregate {
    /// Chain label - unique key of the aggregate table
    pub chain: Chain,

    /// Mean volumes in billions of USD
    pub one_day_volume: f64,
    pub seven_day_volume: f64,
    pub thirty_day_volume: f64,

    /// Mean liquidity in billions of USD
    pub usd_liquidity: f64,

    /// Mean project count
    pub project_count: f64,

    /// Volatility proxy: per-record coefficient of variation across the
    /// three volume horizons, averaged within the chain
    pub volume_std: f64,

    /// Mean liquidity divided by the mean of the three volume means
    pub liquidity_ratio: f64,
}

impl ChainAggregate {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and the report text summary
    pub fn summary(&self) -> String {
        format!(
            "{}: 1d {:.2} | 7d {:.2} | 30d {:.2} | liq {:.2} | projects {:.1} | vol_std {:.3} | liq_ratio {:.3}",
            self.chain,
            self.one_day_volume,
            self.seven_day_volume,
            self.thirty_day_volume,
            self.usd_liquidity,
            self.project_count,
            self.volume_std,
            self.liquidity_ratio
        )
    }
}

/// Aggregate the unified table into one row per distinct chain
///
/// **Public** - main entry point for aggregation
///
/// # Errors
/// * `AggregateError::DivisionByZero` - A chain's mean volume is zero
/// * `AggregateError::EmptyGroup` - Defensive, unreachable by construction
pub fn aggregate(records: &[NormalizedRecord]) -> Result<Vec<ChainAggregate>, AggregateError> {
    // BTreeMap keeps aggregate rows in Chain::ALL order
    let mut groups: BTreeMap<Chain, Vec<&NormalizedRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.chain).or_default().push(record);
    }

    debug!(
        "Aggregating {} records across {} chains",
        records.len(),
        groups.len()
    );

    groups
        .into_iter()
        .map(|(chain, group)| aggregate_group(chain, &group))
        .collect()
}

/// Compute the aggregate row for a single chain's records
///
/// **Public** - exposed so the defensive empty-group path is testable
pub fn aggregate_group(
    chain: Chain,
    records: &[&NormalizedRecord],
) -> Result<ChainAggregate, AggregateError> {
    if records.is_empty() {
        return Err(AggregateError::EmptyGroup(chain.label().to_string()));
    }

    let one_day_volume = mean(records.iter().map(|r| r.one_day_volume));
    let seven_day_volume = mean(records.iter().map(|r| r.seven_day_volume));
    let thirty_day_volume = mean(records.iter().map(|r| r.thirty_day_volume));
    let usd_liquidity = mean(records.iter().map(|r| r.usd_liquidity));
    let project_count = mean(records.iter().map(|r| f64::from(r.project_count)));

    // volume_std is row-then-group: the coefficient of variation is computed
    // per record first, then averaged within the chain. Grouping first and
    // taking the dispersion of the three means yields different numbers.
    let mut dispersions = Vec::with_capacity(records.len());
    for record in records {
        match volume_dispersion(record) {
            Some(value) => dispersions.push(value),
            None => warn!(
                "{}: zero volume mean for {}, excluded from volume_std",
                chain, record.token_pair
            ),
        }
    }
    if dispersions.is_empty() {
        return Err(AggregateError::DivisionByZero {
            chain: chain.label().to_string(),
            metric: "volume_std",
        });
    }
    let volume_std = mean(dispersions.iter().copied());

    let volume_mean = (one_day_volume + seven_day_volume + thirty_day_volume) / 3.0;
    if volume_mean == 0.0 {
        return Err(AggregateError::DivisionByZero {
            chain: chain.label().to_string(),
            metric: "liquidity_ratio",
        });
    }
    let liquidity_ratio = usd_liquidity / volume_mean;

    Ok(ChainAggregate {
        chain,
        one_day_volume,
        seven_day_volume,
        thirty_day_volume,
        usd_liquidity,
        project_count,
        volume_std,
        liquidity_ratio,
    })
}

/// Per-record volatility proxy across the three volume horizons.
///
/// Sample standard deviation (ddof = 1) divided by the mean. Returns `None`
/// when the mean is zero: the ratio is undefined and the record is excluded
/// from the chain average rather than treated as zero.
pub fn volume_dispersion(record: &NormalizedRecord) -> Option<f64> {
    let values = [
        record.one_day_volume,
        record.seven_day_volume,
        record.thirty_day_volume,
    ];
    let m = values.iter().sum::<f64>() / 3.0;
    if m == 0.0 {
        return None;
    }

    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / 2.0;
    Some(variance.sqrt() / m)
}

/// Arithmetic mean of a non-empty iterator
///
/// **Private** - callers guarantee at least one element
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    sum / count.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(chain: Chain, volumes: [f64; 3], liquidity: f64) -> NormalizedRecord {
        NormalizedRecord {
            chain,
            token_pair: "TEST-PAIR".to_string(),
            all_time_volume: 0.0,
            one_day_volume: volumes[0],
            seven_day_volume: volumes[1],
            thirty_day_volume: volumes[2],
            usd_liquidity: liquidity,
            project_count: 3,
        }
    }

    #[test]
    fn test_volume_dispersion() {
        // Mean 2.0, sample std sqrt((1 + 0 + 1) / 2) = 1.0
        let r = record(Chain::Ethereum, [1.0, 2.0, 3.0], 4.0);
        assert_eq!(volume_dispersion(&r), Some(0.5));

        // Constant volumes: zero dispersion
        let flat = record(Chain::Bnb, [10.0, 10.0, 10.0], 5.0);
        assert_eq!(volume_dispersion(&flat), Some(0.0));
    }

    #[test]
    fn test_volume_dispersion_zero_mean_is_undefined() {
        let r = record(Chain::Solana, [0.0, 0.0, 0.0], 1.0);
        assert_eq!(volume_dispersion(&r), None);
    }

    #[test]
    fn test_row_then_group_ordering() {
        // Two records: dispersions 0.5 and 0.0, chain average 0.25.
        // Group-then-row over the per-chain means [5.5, 6.0, 6.5] would
        // give 0.5 / 6.0 ~ 0.083 instead - this test pins the order.
        let records = vec![
            record(Chain::Ethereum, [1.0, 2.0, 3.0], 4.0),
            record(Chain::Ethereum, [10.0, 10.0, 10.0], 5.0),
        ];

        let rows = aggregate(&records).unwrap();

        assert_eq!(rows.len(), 1);
        assert!((rows[0].volume_std - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_zero_volume_record_excluded_from_volume_std() {
        let records = vec![
            record(Chain::Polygon, [0.0, 0.0, 0.0], 1.0),
            record(Chain::Polygon, [1.0, 2.0, 3.0], 4.0),
        ];

        let rows = aggregate(&records).unwrap();

        // Only the second record contributes
        assert!((rows[0].volume_std - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_chain_fails_with_division_by_zero() {
        let records = vec![record(Chain::Arbitrum, [0.0, 0.0, 0.0], 1.0)];

        let result = aggregate(&records);

        assert!(matches!(
            result,
            Err(AggregateError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_empty_group_is_defensive_error() {
        let result = aggregate_group(Chain::Optimism, &[]);
        assert!(matches!(result, Err(AggregateError::EmptyGroup(_))));
    }

    #[test]
    fn test_empty_table_aggregates_to_no_rows() {
        let rows = aggregate(&[]).unwrap();
        assert!(rows.is_empty());
    }
}
