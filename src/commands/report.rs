//! Report command implementation.
//!
//! The report command:
//! 1. Loads and preprocesses every chain's snapshot
//! 2. Normalizes each chain's records
//! 3. Merges and aggregates the unified table
//! 4. Renders the static charts
//! 5. Writes the JSON report

use crate::aggregator::{aggregate, ChainAggregate};
use crate::chart::{generate_bar_chart, generate_box_plot, generate_scatter, ChartConfig};
use crate::loader::{load_all_chains, Chain, QualityFlag};
use crate::normalizer::{normalize, NormalizedRecord};
use crate::output::{write_report, write_svg, ChainReport};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Directory containing the per-chain CSV snapshots
    pub data_dir: PathBuf,

    /// Directory receiving charts and report.json
    pub out_dir: PathBuf,

    /// Print text summary to stdout
    pub print_summary: bool,
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_report_args(args: &ReportArgs) -> Result<()> {
    if !args.data_dir.is_dir() {
        anyhow::bail!(
            "data directory does not exist: {}",
            args.data_dir.display()
        );
    }
    if args.out_dir.as_os_str().is_empty() {
        anyhow::bail!("output directory cannot be empty");
    }
    Ok(())
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// Any load, normalize, aggregate or write failure is fatal to the batch
/// run; there is no partial-result mode.
pub fn execute_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting report over {}", args.data_dir.display());

    // Step 1: Load and preprocess every chain
    info!("Step 1/5: Loading chain snapshots...");
    let tables = load_all_chains(&args.data_dir).context("Failed to load chain snapshots")?;

    // Step 2: Normalize per chain, before the merge, so one chain's bad
    // file cannot corrupt another's aggregates
    info!("Step 2/5: Normalizing records...");
    let mut unified: Vec<NormalizedRecord> = Vec::new();
    let mut quality_flags: Vec<QualityFlag> = Vec::new();
    for (chain, loaded) in &tables {
        let normalized = normalize(*chain, &loaded.records)
            .with_context(|| format!("Failed to normalize {} records", chain))?;
        debug!("{}: {} normalized records", chain, normalized.len());
        unified.extend(normalized);
        quality_flags.extend(loaded.flags.iter().cloned());
    }
    info!("Unified table: {} records", unified.len());

    // Step 3: Aggregate by chain
    info!("Step 3/5: Aggregating by chain...");
    let aggregates = aggregate(&unified).context("Failed to aggregate unified table")?;
    for row in &aggregates {
        debug!("{}", row.summary());
    }

    // Step 4: Render static charts
    info!("Step 4/5: Rendering charts...");
    render_static_charts(&args.out_dir, &unified, &aggregates)
        .context("Failed to render charts")?;

    // Step 5: Write the JSON report
    info!("Step 5/5: Writing report...");
    let record_count = unified.len();
    let report = ChainReport::new(aggregates, quality_flags, record_count);
    let report_path = args.out_dir.join("report.json");
    write_report(&report, &report_path).context("Failed to write report JSON")?;

    info!("✓ Report written to: {}", report_path.display());

    if args.print_summary {
        print_summary(&report);
    }

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Render the box plots, scatter and bar charts into the output directory
///
/// **Private** - internal helper for execute_report
fn render_static_charts(
    out_dir: &std::path::Path,
    unified: &[NormalizedRecord],
    aggregates: &[ChainAggregate],
) -> Result<()> {
    let seven_day_groups = group_values(unified, |r| r.seven_day_volume);
    let liquidity_groups = group_values(unified, |r| r.usd_liquidity);

    let charts = [
        (
            "seven_day_volume_by_chain.svg",
            generate_box_plot(
                &seven_day_groups,
                "7-Day Volume (billions USD)",
                &ChartConfig::new("Comparison of 7-Day Trading Volume Across Chains"),
            )?,
        ),
        (
            "usd_liquidity_by_chain.svg",
            generate_box_plot(
                &liquidity_groups,
                "Liquidity (billions USD)",
                &ChartConfig::new("Comparison of USD Liquidity Across Chains"),
            )?,
        ),
        (
            "project_count_impact.svg",
            generate_scatter(
                unified,
                &ChartConfig::new("Project Count Impact on 7-Day Volume and Liquidity"),
            )?,
        ),
        (
            "avg_one_day_volume_by_chain.svg",
            generate_bar_chart(
                &aggregates
                    .iter()
                    .map(|a| (a.chain, a.one_day_volume))
                    .collect::<Vec<_>>(),
                "Average 1-Day Volume (billions USD)",
                &ChartConfig::new("Average 1-Day Trading Volume by Chain"),
            )?,
        ),
        (
            "avg_seven_day_volume_by_chain.svg",
            generate_bar_chart(
                &aggregates
                    .iter()
                    .map(|a| (a.chain, a.seven_day_volume))
                    .collect::<Vec<_>>(),
                "Average 7-Day Volume (billions USD)",
                &ChartConfig::new("Average 7-Day Trading Volume by Chain"),
            )?,
        ),
        (
            "liquidity_ratio_by_chain.svg",
            generate_bar_chart(
                &aggregates
                    .iter()
                    .map(|a| (a.chain, a.liquidity_ratio))
                    .collect::<Vec<_>>(),
                "Liquidity to Volume Ratio",
                &ChartConfig::new("Liquidity to Volume Ratio by Chain"),
            )?,
        ),
        (
            "project_count_by_chain.svg",
            generate_bar_chart(
                &aggregates
                    .iter()
                    .map(|a| (a.chain, a.project_count))
                    .collect::<Vec<_>>(),
                "Average Project Count",
                &ChartConfig::new("Average Number of Projects by Chain"),
            )?,
        ),
    ];

    for (file_name, svg) in charts {
        write_svg(&svg, out_dir.join(file_name))?;
    }

    Ok(())
}

/// Collect one value per record, grouped by chain in display order
///
/// **Private** - box-plot input shape
fn group_values(
    unified: &[NormalizedRecord],
    value: impl Fn(&NormalizedRecord) -> f64,
) -> Vec<(Chain, Vec<f64>)> {
    Chain::ALL
        .iter()
        .map(|&chain| {
            let values = unified
                .iter()
                .filter(|r| r.chain == chain)
                .map(&value)
                .collect();
            (chain, values)
        })
        .collect()
}

/// Print the text summary table
///
/// **Private** - internal helper for execute_report
fn print_summary(report: &ChainReport) {
    println!("\n{}", "=".repeat(80));
    println!("DEX AGGREGATE SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Records:       {}", report.record_count);
    println!("Quality flags: {}", report.quality_flags.len());
    println!();
    for row in &report.aggregates {
        println!("{}", row.summary());
    }
    for flag in &report.quality_flags {
        println!("flag: {}", flag);
    }
    println!("{}", "=".repeat(80));
}
