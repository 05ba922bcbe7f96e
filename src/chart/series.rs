//! Per-chain line charts for the interactive dashboard.
//!
//! The x axis is row position within the chain's snapshot, not a timestamp:
//! the source files are static snapshots with insertion-ordered rows.

use super::{
    draw_axis_labels, draw_frame, draw_y_ticks, escape_text, padded_max, svg_open, ChartConfig,
    LinearScale, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP,
};
use crate::loader::schema::Chain;
use crate::normalizer::NormalizedRecord;
use crate::utils::error::ChartError;
use log::debug;

const DAILY_COLOR: &str = "#0074D9";
const WEEKLY_COLOR: &str = "#FF851B";
const MONTHLY_COLOR: &str = "#2ECC40";
const LIQUIDITY_COLOR: &str = "#B10DC9";

/// Generate the three-horizon volume line chart for one chain
///
/// **Public** - rendered by the dashboard per dropdown selection
///
/// # Errors
/// * `ChartError::EmptySeries` - The chain has no records
pub fn generate_volume_lines(
    chain: Chain,
    records: &[NormalizedRecord],
) -> Result<String, ChartError> {
    if records.is_empty() {
        return Err(ChartError::EmptySeries(format!("{} volumes", chain)));
    }

    debug!("Volume lines for {} ({} rows)", chain, records.len());

    let config = ChartConfig::new(format!("Trading Volumes on {}", chain));
    let series: [(&str, &str, Vec<f64>); 3] = [
        (
            "Daily Volume",
            DAILY_COLOR,
            records.iter().map(|r| r.one_day_volume).collect(),
        ),
        (
            "Weekly Volume",
            WEEKLY_COLOR,
            records.iter().map(|r| r.seven_day_volume).collect(),
        ),
        (
            "Monthly Volume",
            MONTHLY_COLOR,
            records.iter().map(|r| r.thirty_day_volume).collect(),
        ),
    ];

    let y_max = padded_max(series.iter().flat_map(|(_, _, v)| v.iter().copied()));
    let mut svg = open_line_chart(&config, records.len(), y_max, "Volume (billions USD)");

    for (_, color, values) in &series {
        draw_polyline(&mut svg, &config, values, color, records.len(), y_max);
    }
    draw_line_legend(
        &mut svg,
        &config,
        &series
            .iter()
            .map(|(label, color, _)| (*label, *color))
            .collect::<Vec<_>>(),
    );

    svg.push_str("</svg>");
    Ok(svg)
}

/// Generate the liquidity line chart for one chain
///
/// **Public** - rendered by the dashboard per dropdown selection
///
/// # Errors
/// * `ChartError::EmptySeries` - The chain has no records
pub fn generate_liquidity_line(
    chain: Chain,
    records: &[NormalizedRecord],
) -> Result<String, ChartError> {
    if records.is_empty() {
        return Err(ChartError::EmptySeries(format!("{} liquidity", chain)));
    }

    debug!("Liquidity line for {} ({} rows)", chain, records.len());

    let config = ChartConfig::new(format!("Liquidity on {}", chain));
    let values: Vec<f64> = records.iter().map(|r| r.usd_liquidity).collect();
    let y_max = padded_max(values.iter().copied());

    let mut svg = open_line_chart(&config, records.len(), y_max, "USD Liquidity (billions)");
    draw_polyline(&mut svg, &config, &values, LIQUIDITY_COLOR, records.len(), y_max);

    svg.push_str("</svg>");
    Ok(svg)
}

/// Scale over row positions shared by ticks and polylines
///
/// **Private** - a one-row chart still needs a non-degenerate domain
fn row_scale(config: &ChartConfig, rows: usize) -> LinearScale {
    let right = config.width as f64 - MARGIN_RIGHT;
    LinearScale::new(
        0.0,
        rows.saturating_sub(1).max(1) as f64,
        MARGIN_LEFT,
        right,
    )
}

/// Open an SVG line chart: frame, ticks, axis captions
///
/// **Private** - shared by both series charts
fn open_line_chart(config: &ChartConfig, rows: usize, y_max: f64, y_label: &str) -> String {
    let bottom = config.height as f64 - MARGIN_BOTTOM;
    let y_scale = LinearScale::new(0.0, y_max, bottom, MARGIN_TOP);

    let mut svg = svg_open(config);
    draw_y_ticks(&mut svg, config, &y_scale);
    draw_frame(&mut svg, config);
    draw_axis_labels(&mut svg, config, "Row Position (snapshot order)", y_label);

    // A few x ticks showing row indexes
    const TICKS: usize = 5;
    let x_scale = row_scale(config, rows);
    for i in 0..=TICKS {
        let row = rows.saturating_sub(1) as f64 * i as f64 / TICKS as f64;
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle">{row:.0}</text>"#,
            x = x_scale.apply(row),
            y = bottom + 20.0,
            row = row
        ));
    }

    svg
}

/// Draw one value series as a polyline over row positions
///
/// **Private** - a single row degenerates to a visible dot
fn draw_polyline(
    svg: &mut String,
    config: &ChartConfig,
    values: &[f64],
    color: &str,
    rows: usize,
    y_max: f64,
) {
    let bottom = config.height as f64 - MARGIN_BOTTOM;
    let x_scale = row_scale(config, rows);
    let y_scale = LinearScale::new(0.0, y_max, bottom, MARGIN_TOP);

    if values.len() == 1 {
        svg.push_str(&format!(
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{color}"/>"#,
            x = x_scale.apply(0.0),
            y = y_scale.apply(values[0]),
            color = color
        ));
        return;
    }

    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{:.1},{:.1}", x_scale.apply(i as f64), y_scale.apply(*v)))
        .collect();
    svg.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
        points.join(" "),
        color
    ));
}

/// Legend for multi-series line charts
///
/// **Private**
fn draw_line_legend(svg: &mut String, config: &ChartConfig, entries: &[(&str, &str)]) {
    let x = config.width as f64 - MARGIN_RIGHT - 150.0;
    let mut y = MARGIN_TOP + 10.0;
    for (label, color) in entries {
        svg.push_str(&format!(
            r#"<line x1="{x:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="{color}" stroke-width="2"/>"#,
            x = x,
            x2 = x + 20.0,
            y = y,
            color = color
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" dy="4">{label}</text>"#,
            x = x + 26.0,
            y = y,
            label = escape_text(label)
        ));
        y += 18.0;
    }
}
