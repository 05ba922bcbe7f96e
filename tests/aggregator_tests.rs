use dexlens::aggregator::{aggregate, volume_dispersion};
use dexlens::loader::schema::{Chain, ChainRecord};
use dexlens::normalizer::normalize;

fn raw_record(pair: &str, volumes: [f64; 3], liquidity: f64, projects: &str) -> ChainRecord {
    ChainRecord {
        token_pair: pair.to_string(),
        all_time_volume: volumes[0] + volumes[1] + volumes[2],
        one_day_volume: volumes[0],
        seven_day_volume: volumes[1],
        thirty_day_volume: volumes[2],
        usd_liquidity: liquidity,
        projects: projects.to_string(),
        token_a_address: "0xa".to_string(),
        token_b_address: "0xb".to_string(),
        pool_ids: "p1".to_string(),
    }
}

#[test]
fn test_single_record_chain_metrics() {
    // Raw volumes 1e9/2e9/3e9 USD rescale to 1.0/2.0/3.0 billions,
    // liquidity 4e9 to 4.0. Volume mean 2.0, so liquidity_ratio is 2.0.
    let records = normalize(
        Chain::Ethereum,
        &[raw_record("WETH-USDC", [1e9, 2e9, 3e9], 4e9, "['uniswap','sushiswap','curve']")],
    )
    .unwrap();

    let rows = aggregate(&records).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].chain, Chain::Ethereum);
    assert_eq!(rows[0].one_day_volume, 1.0);
    assert_eq!(rows[0].seven_day_volume, 2.0);
    assert_eq!(rows[0].thirty_day_volume, 3.0);
    assert_eq!(rows[0].usd_liquidity, 4.0);
    assert_eq!(rows[0].project_count, 3.0);
    assert!((rows[0].liquidity_ratio - 2.0).abs() < 1e-12);
    // Sample std of [1, 2, 3] is 1.0, mean is 2.0
    assert!((rows[0].volume_std - 0.5).abs() < 1e-12);
}

#[test]
fn test_two_chains_aggregate_independently() {
    let mut records = normalize(
        Chain::Ethereum,
        &[raw_record("WETH-USDC", [1e9, 2e9, 3e9], 4e9, "['uniswap']")],
    )
    .unwrap();
    records.extend(
        normalize(
            Chain::Bnb,
            &[raw_record("WBNB-BUSD", [10e9, 10e9, 10e9], 5e9, "['pancakeswap']")],
        )
        .unwrap(),
    );

    let rows = aggregate(&records).unwrap();

    assert_eq!(rows.len(), 2);
    let eth = rows.iter().find(|r| r.chain == Chain::Ethereum).unwrap();
    let bnb = rows.iter().find(|r| r.chain == Chain::Bnb).unwrap();

    assert!((eth.liquidity_ratio - 2.0).abs() < 1e-12);
    // Constant volumes on BNB: ratio 5/10, zero dispersion
    assert!((bnb.liquidity_ratio - 0.5).abs() < 1e-12);
    assert_eq!(bnb.volume_std, 0.0);
}

#[test]
fn test_aggregation_is_a_partition() {
    // Every record lands in exactly one group: group sizes recovered from
    // the mean-weighted sums must add back up to the input count.
    let mut records = Vec::new();
    for (chain, count) in [(Chain::Solana, 3usize), (Chain::Polygon, 2), (Chain::Arbitrum, 1)] {
        for i in 0..count {
            let v = (i + 1) as f64 * 1e9;
            records.extend(
                normalize(chain, &[raw_record("PAIR", [v, v, v], v, "['orca']")]).unwrap(),
            );
        }
    }

    let rows = aggregate(&records).unwrap();

    assert_eq!(rows.len(), 3);
    let chains: Vec<Chain> = rows.iter().map(|r| r.chain).collect();
    assert_eq!(chains, vec![Chain::Solana, Chain::Polygon, Chain::Arbitrum]);
}

#[test]
fn test_liquidity_ratio_scale_invariance() {
    // Doubling every USD amount leaves the ratio metrics unchanged
    let base = normalize(
        Chain::Optimism,
        &[raw_record("OP-USDC", [2e9, 4e9, 6e9], 8e9, "['velodrome']")],
    )
    .unwrap();
    let doubled = normalize(
        Chain::Optimism,
        &[raw_record("OP-USDC", [4e9, 8e9, 12e9], 16e9, "['velodrome']")],
    )
    .unwrap();

    let base_rows = aggregate(&base).unwrap();
    let doubled_rows = aggregate(&doubled).unwrap();

    assert!((base_rows[0].liquidity_ratio - doubled_rows[0].liquidity_ratio).abs() < 1e-12);
    assert!((base_rows[0].volume_std - doubled_rows[0].volume_std).abs() < 1e-12);
}

#[test]
fn test_dispersion_matches_group_average() {
    let records = normalize(
        Chain::Ethereum,
        &[
            raw_record("A", [1e9, 2e9, 3e9], 1e9, "[]"),
            raw_record("B", [10e9, 10e9, 10e9], 1e9, "[]"),
        ],
    )
    .unwrap();

    let expected: f64 = records
        .iter()
        .filter_map(volume_dispersion)
        .sum::<f64>()
        / records.len() as f64;

    let rows = aggregate(&records).unwrap();

    assert!((rows[0].volume_std - expected).abs() < 1e-12);
    assert!((rows[0].volume_std - 0.25).abs() < 1e-12);
}
