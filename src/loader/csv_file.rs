//! CSV reading for per-chain snapshot files.
//!
//! Reads raw rows into a typed representation. Numeric fields stay optional
//! at this stage; the preprocess step decides what happens to gaps.

use crate::utils::config::REQUIRED_COLUMNS;
use crate::utils::error::LoadError;
use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Raw row as it appears in the source file.
///
/// Empty numeric cells deserialize to `None`; "inf"/"-inf"/"NaN" parse to the
/// corresponding non-finite floats and are scrubbed during preprocessing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub token_pair: String,
    pub all_time_volume: Option<f64>,
    pub one_day_volume: Option<f64>,
    pub seven_day_volume: Option<f64>,
    pub thirty_day_volume: Option<f64>,
    pub usd_liquidity: Option<f64>,
    pub projects: String,
    #[serde(default)]
    pub token_a_address: String,
    #[serde(default)]
    pub token_b_address: String,
    #[serde(default)]
    pub pool_ids: String,
}

/// Read all raw rows from a single chain's snapshot file
///
/// **Public** - main entry point for CSV reading
///
/// # Errors
/// * `LoadError::DataUnavailable` - File unreadable, a required column is
///   missing from the header, or any row fails to parse. A malformed row is
///   fatal: there is no partial-result mode, and failing here keeps one
///   chain's bad file from corrupting the merged table.
pub fn read_chain_file(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let file = File::open(path).map_err(|e| {
        LoadError::DataUnavailable(format!("cannot open {}: {}", path.display(), e))
    })?;

    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::DataUnavailable(format!("{}: {}", path.display(), e)))?
        .clone();
    validate_headers(&headers, path)?;

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<RawRecord>().enumerate() {
        let row = result.map_err(|e| {
            LoadError::DataUnavailable(format!(
                "malformed row {} in {}: {}",
                index + 1,
                path.display(),
                e
            ))
        })?;
        rows.push(row);
    }

    debug!("Read {} raw rows from {}", rows.len(), path.display());

    Ok(rows)
}

/// Check that every required column is present in the header row
///
/// **Private** - internal validation
fn validate_headers(headers: &csv::StringRecord, path: &Path) -> Result<(), LoadError> {
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *required) {
            return Err(LoadError::DataUnavailable(format!(
                "missing required column '{}' in {}",
                required,
                path.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "token_pair,all_time_volume,one_day_volume,seven_day_volume,\
thirty_day_volume,usd_liquidity,projects,token_a_address,token_b_address,pool_ids";

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_read_valid_file() {
        let file = write_csv(&format!(
            "{}\nWETH-USDC,5e9,1e9,2e9,3e9,4e9,\"['uniswap']\",0xa,0xb,p1\n",
            HEADER
        ));

        let rows = read_chain_file(file.path()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].token_pair, "WETH-USDC");
        assert_eq!(rows[0].one_day_volume, Some(1e9));
        assert_eq!(rows[0].projects, "['uniswap']");
    }

    #[test]
    fn test_empty_numeric_cell_is_none() {
        let file = write_csv(&format!(
            "{}\nWETH-USDC,5e9,,2e9,3e9,4e9,\"[]\",0xa,0xb,p1\n",
            HEADER
        ));

        let rows = read_chain_file(file.path()).unwrap();
        assert_eq!(rows[0].one_day_volume, None);
    }

    #[test]
    fn test_inf_cell_parses_as_infinite() {
        let file = write_csv(&format!(
            "{}\nWETH-USDC,5e9,inf,2e9,3e9,4e9,\"[]\",0xa,0xb,p1\n",
            HEADER
        ));

        let rows = read_chain_file(file.path()).unwrap();
        assert!(rows[0].one_day_volume.unwrap().is_infinite());
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let result = read_chain_file(Path::new("/nonexistent/dex_pairs_ethereum.csv"));
        assert!(matches!(result, Err(LoadError::DataUnavailable(_))));
    }

    #[test]
    fn test_missing_required_column() {
        // No usd_liquidity column
        let file = write_csv(
            "token_pair,all_time_volume,one_day_volume,seven_day_volume,\
thirty_day_volume,projects,token_a_address,token_b_address,pool_ids\n\
WETH-USDC,5e9,1e9,2e9,3e9,\"[]\",0xa,0xb,p1\n",
        );

        let result = read_chain_file(file.path());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("usd_liquidity"));
    }

    #[test]
    fn test_malformed_row_is_fatal() {
        let file = write_csv(&format!(
            "{}\nWETH-USDC,not_a_number,1e9,2e9,3e9,4e9,\"[]\",0xa,0xb,p1\n",
            HEADER
        ));

        let result = read_chain_file(file.path());
        assert!(matches!(result, Err(LoadError::DataUnavailable(_))));
    }
}
