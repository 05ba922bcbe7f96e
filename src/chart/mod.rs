//! SVG chart generation.
//!
//! All charts are built as plain SVG strings with a shared frame layout:
//! title at the top, y axis with ticks on the left, category or index
//! labels along the bottom. Chains get stable colors from the palette in
//! `utils::config`.

pub mod comparison;
pub mod distribution;
pub mod series;

pub use comparison::{generate_bar_chart, generate_scatter};
pub use distribution::{box_stats, generate_box_plot, BoxStats};
pub use series::{generate_liquidity_line, generate_volume_lines};

use crate::loader::schema::Chain;
use crate::utils::config::CHAIN_COLORS;

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 900,
            height: 500,
        }
    }
}

impl ChartConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

// Frame margins shared by every chart
pub(crate) const MARGIN_LEFT: f64 = 70.0;
pub(crate) const MARGIN_RIGHT: f64 = 30.0;
pub(crate) const MARGIN_TOP: f64 = 50.0;
pub(crate) const MARGIN_BOTTOM: f64 = 60.0;

/// Linear mapping from a data domain onto a pixel range.
///
/// For y axes the range runs from the bottom of the plot area to the top,
/// so larger values map to smaller pixel coordinates.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    pub(crate) fn new(domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    pub(crate) fn apply(&self, value: f64) -> f64 {
        let span = self.domain_max - self.domain_min;
        if span == 0.0 {
            return (self.range_min + self.range_max) / 2.0;
        }
        let t = (value - self.domain_min) / span;
        self.range_min + t * (self.range_max - self.range_min)
    }

    pub(crate) fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }
}

/// Stable color for a chain
pub(crate) fn chain_color(chain: Chain) -> &'static str {
    CHAIN_COLORS[chain.palette_index() % CHAIN_COLORS.len()]
}

/// Escape text for embedding in SVG
pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Open the SVG document: header, base styles, centered title
pub(crate) fn svg_open(config: &ChartConfig) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    ));
    svg.push_str(
        r#"<style>text { font: 12px sans-serif; } .title { font: bold 16px sans-serif; } .axis { stroke: #333; stroke-width: 1; } .tick { stroke: #ddd; stroke-width: 1; }</style>"#,
    );
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="25" text-anchor="middle" class="title">{}</text>"#,
        config.width / 2,
        escape_text(&config.title)
    ));
    svg
}

/// Draw the x and y axis lines around the plot area
pub(crate) fn draw_frame(svg: &mut String, config: &ChartConfig) {
    let bottom = config.height as f64 - MARGIN_BOTTOM;
    let right = config.width as f64 - MARGIN_RIGHT;
    svg.push_str(&format!(
        r#"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" class="axis"/>"#,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = bottom
    ));
    svg.push_str(&format!(
        r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" class="axis"/>"#,
        l = MARGIN_LEFT,
        b = bottom,
        r = right
    ));
}

/// Draw horizontal gridlines with value labels along the y axis
pub(crate) fn draw_y_ticks(svg: &mut String, config: &ChartConfig, scale: &LinearScale) {
    const TICKS: usize = 5;
    let (min, max) = scale.domain();
    let right = config.width as f64 - MARGIN_RIGHT;

    for i in 0..=TICKS {
        let value = min + (max - min) * i as f64 / TICKS as f64;
        let y = scale.apply(value);
        svg.push_str(&format!(
            r#"<line x1="{l}" y1="{y:.1}" x2="{r}" y2="{y:.1}" class="tick"/>"#,
            l = MARGIN_LEFT,
            y = y,
            r = right
        ));
        svg.push_str(&format!(
            r#"<text x="{x}" y="{y:.1}" text-anchor="end" dy="4">{v}</text>"#,
            x = MARGIN_LEFT - 8.0,
            y = y,
            v = format_tick(value)
        ));
    }
}

/// Draw the axis caption under the x axis and rotated along the y axis
pub(crate) fn draw_axis_labels(svg: &mut String, config: &ChartConfig, x_label: &str, y_label: &str) {
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
        config.width / 2,
        config.height as f64 - 12.0,
        escape_text(x_label)
    ));
    let y_mid = (MARGIN_TOP + config.height as f64 - MARGIN_BOTTOM) / 2.0;
    svg.push_str(&format!(
        r#"<text x="18" y="{y:.1}" text-anchor="middle" transform="rotate(-90 18 {y:.1})">{}</text>"#,
        escape_text(y_label),
        y = y_mid
    ));
}

/// Compact tick label formatting
pub(crate) fn format_tick(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 100.0 {
        format!("{:.0}", value)
    } else if value.abs() >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.3}", value)
    }
}

/// Pad a data maximum so points do not sit on the frame edge
pub(crate) fn padded_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(f64::MIN, f64::max);
    if max <= 0.0 || !max.is_finite() {
        1.0
    } else {
        max * 1.05
    }
}
