//! Box plots comparing a metric's distribution across chains.
//!
//! Standard box-plot semantics: box from first to third quartile, median
//! line, whiskers at the furthest points within 1.5 IQR of the box, and
//! individual outlier markers beyond the whiskers.

use super::{
    chain_color, draw_axis_labels, draw_frame, draw_y_ticks, escape_text, svg_open, ChartConfig,
    LinearScale, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP,
};
use crate::loader::schema::Chain;
use crate::utils::error::ChartError;
use log::debug;

/// Five-number summary plus outliers for one group
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Compute box-plot statistics for one group of values
///
/// **Public** - also used by tests to pin quartile behavior
///
/// Returns `None` for an empty group.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let whisker_low = sorted
        .iter()
        .copied()
        .find(|v| *v >= low_fence)
        .unwrap_or(q1);
    let whisker_high = sorted
        .iter()
        .copied()
        .rev()
        .find(|v| *v <= high_fence)
        .unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    })
}

/// Linearly interpolated quantile over sorted values
///
/// **Private** - same method as numpy's default
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let fraction = position - lower as f64;
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

/// Generate a box-plot SVG with one box per chain
///
/// **Public** - main entry point for distribution charts
///
/// # Arguments
/// * `groups` - Per-chain value lists; empty groups are skipped
/// * `value_label` - Y-axis caption (e.g. "7-Day Volume (billions USD)")
///
/// # Errors
/// * `ChartError::EmptySeries` - No group contains any value
pub fn generate_box_plot(
    groups: &[(Chain, Vec<f64>)],
    value_label: &str,
    config: &ChartConfig,
) -> Result<String, ChartError> {
    let boxes: Vec<(Chain, BoxStats)> = groups
        .iter()
        .filter_map(|(chain, values)| box_stats(values).map(|stats| (*chain, stats)))
        .collect();

    if boxes.is_empty() {
        return Err(ChartError::EmptySeries(value_label.to_string()));
    }

    debug!("Box plot '{}' with {} groups", config.title, boxes.len());

    let data_min = boxes
        .iter()
        .flat_map(|(_, b)| {
            b.outliers
                .iter()
                .copied()
                .chain([b.whisker_low, b.whisker_high])
        })
        .fold(f64::MAX, f64::min)
        .min(0.0);
    let data_max = boxes
        .iter()
        .flat_map(|(_, b)| b.outliers.iter().copied().chain([b.whisker_high]))
        .fold(f64::MIN, f64::max)
        .max(data_min + 1e-9);

    let bottom = config.height as f64 - MARGIN_BOTTOM;
    let y_scale = LinearScale::new(data_min, data_max * 1.05, bottom, MARGIN_TOP);

    let mut svg = svg_open(config);
    draw_y_ticks(&mut svg, config, &y_scale);
    draw_frame(&mut svg, config);
    draw_axis_labels(&mut svg, config, "Blockchain Chain", value_label);

    let plot_width = config.width as f64 - MARGIN_LEFT - MARGIN_RIGHT;
    let slot_width = plot_width / boxes.len() as f64;
    let box_width = (slot_width * 0.5).min(80.0);

    for (index, (chain, stats)) in boxes.iter().enumerate() {
        let center = MARGIN_LEFT + slot_width * (index as f64 + 0.5);
        let color = chain_color(*chain);
        draw_box(&mut svg, center, box_width, stats, color, &y_scale);

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

/// Draw one box with whiskers, median and outliers
///
/// **Private** - internal rendering
fn draw_box(
    svg: &mut String,
    center: f64,
    box_width: f64,
    stats: &BoxStats,
    color: &str,
    y_scale: &LinearScale,
) {
    let half = box_width / 2.0;
    let y_q1 = y_scale.apply(stats.q1);
    let y_q3 = y_scale.apply(stats.q3);
    let y_median = y_scale.apply(stats.median);
    let y_low = y_scale.apply(stats.whisker_low);
    let y_high = y_scale.apply(stats.whisker_high);

    // Whisker stems and caps
    svg.push_str(&format!(
        r##"<line x1="{c:.1}" y1="{a:.1}" x2="{c:.1}" y2="{b:.1}" stroke="#333"/>"##,
        c = center,
        a = y_low,
        b = y_q1
    ));
    svg.push_str(&format!(
        r##"<line x1="{c:.1}" y1="{a:.1}" x2="{c:.1}" y2="{b:.1}" stroke="#333"/>"##,
        c = center,
        a = y_q3,
        b = y_high
    ));
    for y in [y_low, y_high] {
        svg.push_str(&format!(
            r##"<line x1="{a:.1}" y1="{y:.1}" x2="{b:.1}" y2="{y:.1}" stroke="#333"/>"##,
            a = center - half / 2.0,
            b = center + half / 2.0,
            y = y
        ));
    }

    // Box from q1 to q3
    svg.push_str(&format!(
        r##"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{color}" fill-opacity="0.6" stroke="#333"/>"##,
        x = center - half,
        y = y_q3,
        w = box_width,
        h = (y_q1 - y_q3).max(1.0),
        color = color
    ));

    // Median line
    svg.push_str(&format!(
        r##"<line x1="{a:.1}" y1="{y:.1}" x2="{b:.1}" y2="{y:.1}" stroke="#000" stroke-width="2"/>"##,
        a = center - half,
        b = center + half,
        y = y_median
    ));

    // Outliers
    for value in &stats.outliers {
        svg.push_str(&format!(
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="2.5" fill="none" stroke="{color}"/>"#,
            x = center,
            y = y_scale.apply(*value),
            color = color
        ));
    }
}
