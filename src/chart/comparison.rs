//! Cross-chain comparison charts: scatter and bar charts.

use super::{
    chain_color, draw_axis_labels, draw_frame, draw_y_ticks, escape_text, format_tick, padded_max,
    svg_open, ChartConfig, LinearScale, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP,
};
use crate::loader::schema::Chain;
use crate::normalizer::NormalizedRecord;
use crate::utils::error::ChartError;
use log::debug;

const MIN_MARKER_RADIUS: f64 = 3.0;
const MAX_MARKER_RADIUS: f64 = 14.0;

/// Generate a scatter of project count vs seven-day volume.
///
/// **Public** - markers are colored by chain and sized by liquidity.
///
/// # Errors
/// * `ChartError::EmptySeries` - No records to plot
pub fn generate_scatter(
    records: &[NormalizedRecord],
    config: &ChartConfig,
) -> Result<String, ChartError> {
    if records.is_empty() {
        return Err(ChartError::EmptySeries("scatter".to_string()));
    }

    debug!("Scatter '{}' with {} points", config.title, records.len());

    let x_max = padded_max(records.iter().map(|r| f64::from(r.project_count)));
    let y_max = padded_max(records.iter().map(|r| r.seven_day_volume));
    let liquidity_max = records
        .iter()
        .map(|r| r.usd_liquidity)
        .fold(0.0, f64::max)
        .max(f64::MIN_POSITIVE);

    let bottom = config.height as f64 - MARGIN_BOTTOM;
    let right = config.width as f64 - MARGIN_RIGHT;
    let x_scale = LinearScale::new(0.0, x_max, MARGIN_LEFT, right);
    let y_scale = LinearScale::new(0.0, y_max, bottom, MARGIN_TOP);

    let mut svg = svg_open(config);
    draw_y_ticks(&mut svg, config, &y_scale);
    draw_frame(&mut svg, config);
    draw_axis_labels(
        &mut svg,
        config,
        "Number of Projects",
        "7-Day Volume (billions USD)",
    );
    draw_x_ticks(&mut svg, &x_scale, bottom);

    for record in records {
        let radius = MIN_MARKER_RADIUS
            + (record.usd_liquidity / liquidity_max).clamp(0.0, 1.0)
                * (MAX_MARKER_RADIUS - MIN_MARKER_RADIUS);
        svg.push_str(&format!(
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="{r:.1}" fill="{color}" fill-opacity="0.7" stroke="{color}"/>"#,
            x = x_scale.apply(f64::from(record.project_count)),
            y = y_scale.apply(record.seven_day_volume),
            r = radius,
            color = chain_color(record.chain)
        ));
    }

    let chains: Vec<Chain> = Chain::ALL
        .iter()
        .copied()
        .filter(|chain| records.iter().any(|r| r.chain == *chain))
        .collect();
    draw_legend(&mut svg, config, &chains);

    svg.push_str("</svg>");
    Ok(svg)
}

/// Generate a bar chart of one value per chain
///
/// **Public** - used for liquidity ratio and mean project count
///
/// # Errors
/// * `ChartError::EmptySeries` - No bars to draw
pub fn generate_bar_chart(
    values: &[(Chain, f64)],
    value_label: &str,
    config: &ChartConfig,
) -> Result<String, ChartError> {
    if values.is_empty() {
        return Err(ChartError::EmptySeries(value_label.to_string()));
    }

    debug!("Bar chart '{}' with {} bars", config.title, values.len());

    let y_max = padded_max(values.iter().map(|(_, v)| *v));
    let bottom = config.height as f64 - MARGIN_BOTTOM;
    let y_scale = LinearScale::new(0.0, y_max, bottom, MARGIN_TOP);

    let mut svg = svg_open(config);
    draw_y_ticks(&mut svg, config, &y_scale);
    draw_frame(&mut svg, config);
    draw_axis_labels(&mut svg, config, "Blockchain Chain", value_label);

    let plot_width = config.width as f64 - MARGIN_LEFT - MARGIN_RIGHT;
    let slot_width = plot_width / values.len() as f64;
    let bar_width = (slot_width * 0.6).min(90.0);

    for (index, (chain, value)) in values.iter().enumerate() {
        let center = MARGIN_LEFT + slot_width * (index as f64 + 0.5);
        let top = y_scale.apply(value.max(0.0));
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{color}" fill-opacity="0.85"/>"#,
            x = center - bar_width / 2.0,
            y = top,
            w = bar_width,
            h = (bottom - top).max(0.0),
            color = chain_color(*chain)
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle">{v}</text>"#,
            x = center,
            y = top - 6.0,
            v = format_tick(*value)
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle">{label}</text>"#,
            x = center,
            y = bottom + 20.0,
            label = escape_text(chain.label())
        ));
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Integer ticks along the x axis of the scatter
///
/// **Private** - internal rendering
fn draw_x_ticks(svg: &mut String, x_scale: &LinearScale, bottom: f64) {
    const TICKS: usize = 6;
    let (min, max) = x_scale.domain();
    for i in 0..=TICKS {
        let value = (min + (max - min) * i as f64 / TICKS as f64).round();
        let x = x_scale.apply(value);
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle">{v:.0}</text>"#,
            x = x,
            y = bottom + 20.0,
            v = value
        ));
    }
}

/// Color legend mapping chains to marker colors
///
/// **Private** - shared by scatter rendering
fn draw_legend(svg: &mut String, config: &ChartConfig, chains: &[Chain]) {
    let x = config.width as f64 - MARGIN_RIGHT - 130.0;
    let mut y = MARGIN_TOP + 10.0;
    for chain in chains {
        svg.push_str(&format!(
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="5" fill="{color}"/>"#,
            x = x,
            y = y,
            color = chain_color(*chain)
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" dy="4">{label}</text>"#,
            x = x + 12.0,
            y = y,
            label = escape_text(chain.label())
        ));
        y += 18.0;
    }
}
