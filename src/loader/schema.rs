//! Chain identifiers and the cleaned per-chain record schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A blockchain network whose DEX data is tracked.
///
/// The set is closed: the dashboard dropdown, the loader file map and the
/// aggregate key space all enumerate exactly these six chains. Anything else
/// is rejected at the boundary with `DashboardError::ChainNotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Chain {
    Ethereum,
    #[serde(rename = "BNB")]
    Bnb,
    Solana,
    Polygon,
    Arbitrum,
    Optimism,
}

impl Chain {
    /// All known chains, in display order
    pub const ALL: &'static [Chain] = &[
        Chain::Ethereum,
        Chain::Bnb,
        Chain::Solana,
        Chain::Polygon,
        Chain::Arbitrum,
        Chain::Optimism,
    ];

    /// Human-readable label used in charts and reports
    pub fn label(&self) -> &'static str {
        match self {
            Chain::Ethereum => "Ethereum",
            Chain::Bnb => "BNB",
            Chain::Solana => "Solana",
            Chain::Polygon => "Polygon",
            Chain::Arbitrum => "Arbitrum",
            Chain::Optimism => "Optimism",
        }
    }

    /// Lowercase identifier used in file names, URLs and dropdown values
    pub fn id(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Bnb => "bnb",
            Chain::Solana => "solana",
            Chain::Polygon => "polygon",
            Chain::Arbitrum => "arbitrum",
            Chain::Optimism => "optimism",
        }
    }

    /// Snapshot file name for this chain
    pub fn file_name(&self) -> String {
        format!("dex_pairs_{}.csv", self.id())
    }

    /// Position in `ALL`, used to pick a stable chart color
    pub fn palette_index(&self) -> usize {
        Chain::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    /// Look up a chain from a label or identifier, case-insensitively.
    ///
    /// Returns `None` for anything outside the enumerated set; callers at
    /// the dashboard boundary map that to `ChainNotFound`.
    pub fn from_label(value: &str) -> Option<Chain> {
        let needle = value.trim();
        Chain::ALL.iter().copied().find(|chain| {
            chain.label().eq_ignore_ascii_case(needle) || chain.id().eq_ignore_ascii_case(needle)
        })
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One cleaned row of a per-chain snapshot file.
///
/// Numeric fields are guaranteed finite: the loader scrubs infinities,
/// forward-fills gaps and excludes rows it could not complete. Row order is
/// insertion order from the source file and carries no temporal meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainRecord {
    /// Token-pair identity (e.g. "WETH-USDC")
    pub token_pair: String,

    /// Volumes in raw USD units
    pub all_time_volume: f64,
    pub one_day_volume: f64,
    pub seven_day_volume: f64,
    pub thirty_day_volume: f64,

    /// Pool liquidity in raw USD units
    pub usd_liquidity: f64,

    /// Collection-literal string of project identifiers, parsed later
    /// by the normalizer
    pub projects: String,

    /// Address/identifier columns, dropped during normalization
    pub token_a_address: String,
    pub token_b_address: String,
    pub pool_ids: String,
}
