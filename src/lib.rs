//! DexLens
//!
//! Cross-chain DEX volume and liquidity analysis: loads per-chain CSV
//! snapshots, normalizes them into a unified table, aggregates per-chain
//! metrics and renders charts, either as a batch report or as an
//! interactive dashboard.
//!
//! This crate provides the core implementation for the
//! `dexlens` CLI tool.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install dexlens
//! dexlens --help
//! ```
//!
//! For full documentation and examples, see:
//! https://github.com/your-org/dexlens

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod dashboard;
pub mod loader;
pub mod normalizer;
pub mod output;
pub mod utils;
