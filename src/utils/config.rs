//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Constants for USD rescaling
// Raw columns are in USD; reports and charts use billions of USD,
// rounded to two decimals (half away from zero).
pub const USD_TO_BILLIONS_DIVISOR: f64 = 1e9;
pub const ROUND_SCALE: f64 = 100.0;

/// Columns that must be present in every per-chain CSV file
pub const REQUIRED_COLUMNS: &[&str] = &[
    "all_time_volume",
    "one_day_volume",
    "seven_day_volume",
    "thirty_day_volume",
    "usd_liquidity",
    "projects",
    "token_a_address",
    "token_b_address",
    "pool_ids",
];

/// Numeric columns subject to inf-scrubbing and forward fill
pub const NUMERIC_COLUMNS: &[&str] = &[
    "all_time_volume",
    "one_day_volume",
    "seven_day_volume",
    "thirty_day_volume",
    "usd_liquidity",
];

/// The three volume horizons used for the volatility proxy
pub const VOLUME_COLUMNS: &[&str] = &["one_day_volume", "seven_day_volume", "thirty_day_volume"];

/// Default dashboard port
pub const DEFAULT_PORT: u16 = 8050;

/// Per-chain chart palette, one color per known chain (in `Chain::ALL` order)
pub const CHAIN_COLORS: &[&str] = &[
    "#0074D9", "#FF4136", "#2ECC40", "#FF851B", "#7FDBFF", "#B10DC9",
];
