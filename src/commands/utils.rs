use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Records: {}", report.record_count);
    println!("  Chains: {}", report.aggregates.len());
    println!("  Quality Flags: {}", report.quality_flags.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("{}", schema_text(show_details));
}

/// Build the schema help text
///
/// **Private** - separated from `display_schema` so the field
/// descriptions are testable
fn schema_text(show_details: bool) -> String {
    let mut text = format!(
        "DexLens Report Schema\nCurrent Version: {}\n",
        SCHEMA_VERSION
    );

    if show_details {
        text.push_str(
            "\nSchema Structure:\n\
  version: string           - Schema version (e.g., '1.0.0')\n\
  generated_at: string      - ISO 8601 timestamp\n\
  record_count: number      - Rows in the unified table\n\
  aggregates: array         - One entry per chain\n\
    chain: string           - Chain label\n\
    one_day_volume: number  - Mean 1-day volume (billions USD)\n\
    seven_day_volume: number - Mean 7-day volume (billions USD)\n\
    thirty_day_volume: number - Mean 30-day volume (billions USD)\n\
    usd_liquidity: number   - Mean liquidity (billions USD)\n\
    project_count: number   - Mean project count per pair\n\
    volume_std: number      - Mean per-pair volume dispersion ratio\n\
    liquidity_ratio: number - Mean liquidity over the mean of the three volume means\n\
  quality_flags: array      - Cells that could not be repaired\n\
    chain: string           - Chain label\n\
    column: string          - Affected column\n\
    row: number             - Zero-based row index",
        );
    } else {
        text.push_str("\nUse --show for detailed schema information");
    }

    text
}

/// Display version information
pub fn display_version() {
    println!("DexLens v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("A cross-chain DEX volume and liquidity analysis tool.");
    println!("https://github.com/your-org/dexlens");
}
