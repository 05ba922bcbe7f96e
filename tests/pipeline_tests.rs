use dexlens::aggregator::aggregate;
use dexlens::loader::{load_all_chains, load_chain, Chain};
use dexlens::normalizer::{normalize, NormalizedRecord};
use dexlens::output::{read_report, write_report, ChainReport};
use dexlens::utils::error::LoadError;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "token_pair,all_time_volume,one_day_volume,seven_day_volume,\
thirty_day_volume,usd_liquidity,projects,token_a_address,token_b_address,pool_ids";

fn write_snapshot(dir: &Path, chain: Chain, rows: &[&str]) {
    let mut contents = String::from(HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    fs::write(dir.join(chain.file_name()), contents).unwrap();
}

fn seed_all_chains(dir: &Path) {
    for &chain in Chain::ALL {
        write_snapshot(
            dir,
            chain,
            &[
                "WETH-USDC,6e9,1e9,2e9,3e9,4e9,\"['uniswap','sushiswap']\",0xa,0xb,p1",
                "WBTC-USDT,12e9,2e9,4e9,6e9,8e9,\"['uniswap']\",0xc,0xd,p2",
            ],
        );
    }
}

fn normalize_all(dir: &Path) -> (Vec<NormalizedRecord>, usize) {
    let tables = load_all_chains(dir).unwrap();
    let mut unified = Vec::new();
    let mut flag_count = 0;
    for (chain, loaded) in &tables {
        unified.extend(normalize(*chain, &loaded.records).unwrap());
        flag_count += loaded.flags.len();
    }
    (unified, flag_count)
}

#[test]
fn test_full_pipeline_to_report_round_trip() {
    let data_dir = TempDir::new().unwrap();
    seed_all_chains(data_dir.path());

    let tables = load_all_chains(data_dir.path()).unwrap();
    assert_eq!(tables.len(), Chain::ALL.len());

    let (unified, flag_count) = normalize_all(data_dir.path());
    assert_eq!(unified.len(), 2 * Chain::ALL.len());
    assert_eq!(flag_count, 0);

    let aggregates = aggregate(&unified).unwrap();
    assert_eq!(aggregates.len(), Chain::ALL.len());

    // Identical data per chain, so identical aggregate rows.
    // Means: 1d 1.5, 7d 3.0, 30d 4.5, liq 6.0, projects 1.5.
    for row in &aggregates {
        assert!((row.one_day_volume - 1.5).abs() < 1e-12);
        assert!((row.seven_day_volume - 3.0).abs() < 1e-12);
        assert!((row.usd_liquidity - 6.0).abs() < 1e-12);
        assert!((row.project_count - 1.5).abs() < 1e-12);
        // liq mean / volume mean = 6.0 / 3.0
        assert!((row.liquidity_ratio - 2.0).abs() < 1e-12);
    }

    let out_dir = TempDir::new().unwrap();
    let report_path = out_dir.path().join("report.json");
    let report = ChainReport::new(aggregates, Vec::new(), unified.len());
    write_report(&report, &report_path).unwrap();

    let loaded = read_report(&report_path).unwrap();
    assert_eq!(loaded.record_count, 12);
    assert_eq!(loaded.aggregates, report.aggregates);
}

#[test]
fn test_missing_snapshot_file_is_fatal() {
    let data_dir = TempDir::new().unwrap();
    seed_all_chains(data_dir.path());
    fs::remove_file(data_dir.path().join(Chain::Solana.file_name())).unwrap();

    let result = load_all_chains(data_dir.path());

    match result {
        Err(LoadError::DataUnavailable(message)) => {
            assert!(message.contains("dex_pairs_solana.csv"))
        }
        other => panic!("expected DataUnavailable, got {:?}", other),
    }
}

#[test]
fn test_interior_gap_is_forward_filled() {
    let data_dir = TempDir::new().unwrap();
    write_snapshot(
        data_dir.path(),
        Chain::Ethereum,
        &[
            "WETH-USDC,6e9,1e9,2e9,3e9,4e9,\"[]\",0xa,0xb,p1",
            "WBTC-USDT,12e9,,4e9,6e9,8e9,\"[]\",0xc,0xd,p2",
        ],
    );

    let loaded = load_chain(data_dir.path(), Chain::Ethereum).unwrap();

    assert_eq!(loaded.records.len(), 2);
    assert!(loaded.flags.is_empty());
    // Gap filled from the previous row
    assert_eq!(loaded.records[1].one_day_volume, 1e9);
}

#[test]
fn test_leading_gap_flags_propagate_to_report() {
    let data_dir = TempDir::new().unwrap();
    seed_all_chains(data_dir.path());
    // First row of the Polygon file has no value to fill from
    write_snapshot(
        data_dir.path(),
        Chain::Polygon,
        &[
            "WMATIC-USDC,6e9,,2e9,3e9,4e9,\"[]\",0xa,0xb,p1",
            "WETH-USDC,12e9,2e9,4e9,6e9,8e9,\"['quickswap']\",0xc,0xd,p2",
        ],
    );

    let tables = load_all_chains(data_dir.path()).unwrap();
    let polygon = &tables[&Chain::Polygon];

    // The unfillable row is excluded, never zero-filled
    assert_eq!(polygon.records.len(), 1);
    assert_eq!(polygon.records[0].token_pair, "WETH-USDC");
    assert_eq!(polygon.flags.len(), 1);
    assert_eq!(polygon.flags[0].chain, Chain::Polygon);
    assert_eq!(polygon.flags[0].column, "one_day_volume");
    assert_eq!(polygon.flags[0].row, 0);

    let (unified, _) = normalize_all(data_dir.path());
    let aggregates = aggregate(&unified).unwrap();
    let flags = polygon.flags.clone();

    let out_dir = TempDir::new().unwrap();
    let report_path = out_dir.path().join("report.json");
    write_report(
        &ChainReport::new(aggregates, flags, unified.len()),
        &report_path,
    )
    .unwrap();

    let loaded = read_report(&report_path).unwrap();
    assert_eq!(loaded.quality_flags.len(), 1);
    assert_eq!(loaded.quality_flags[0].column, "one_day_volume");
}

#[test]
fn test_non_finite_values_are_scrubbed_then_filled() {
    let data_dir = TempDir::new().unwrap();
    write_snapshot(
        data_dir.path(),
        Chain::Arbitrum,
        &[
            "ARB-USDC,6e9,1e9,2e9,3e9,4e9,\"[]\",0xa,0xb,p1",
            "WETH-USDC,12e9,inf,4e9,6e9,8e9,\"[]\",0xc,0xd,p2",
        ],
    );

    let loaded = load_chain(data_dir.path(), Chain::Arbitrum).unwrap();

    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.records[1].one_day_volume, 1e9);
    assert!(loaded.records.iter().all(|r| r.one_day_volume.is_finite()));
}
