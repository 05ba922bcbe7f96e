//! Output writers for aggregate reports and chart SVGs.
//!
//! This module handles writing data to disk:
//! - JSON aggregate reports (versioned schema)
//! - SVG chart files

pub mod json;
pub mod svg;

// Re-export main functions
pub use json::{read_report, write_report, ChainReport};
pub use svg::write_svg;
