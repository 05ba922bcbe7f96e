//! Interactive dashboard over the normalized tables.
//!
//! A single-process HTTP view: one dropdown of the six known chains drives
//! two line charts (volume components and liquidity) for the selection.

pub mod context;
pub mod server;

// Re-export main types and functions
pub use context::DashboardContext;
pub use server::{router, run_server};
