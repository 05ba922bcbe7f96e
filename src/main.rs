//! DexLens CLI
//!
//! Cross-chain DEX volume and liquidity analysis over per-chain CSV
//! snapshots. Generates JSON reports with SVG charts, or serves an
//! interactive dashboard.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use dexlens::commands::{
    display_schema, display_version, execute_report, execute_serve, validate_report_args,
    validate_report_file, ReportArgs, ServeArgs,
};
use dexlens::utils::config::DEFAULT_PORT;

/// DexLens - Cross-chain DEX volume and liquidity analysis
#[derive(Parser, Debug)]
#[command(name = "dexlens")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the batch pipeline and write report plus charts
    Report {
        /// Directory containing the per-chain CSV snapshots
        #[arg(short, long, env = "DEXLENS_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Output directory for charts and report.json
        #[arg(short, long, default_value = "out")]
        out_dir: PathBuf,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Serve the interactive dashboard
    Serve {
        /// Directory containing the per-chain CSV snapshots
        #[arg(short, long, env = "DEXLENS_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// TCP port for the dashboard
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Report {
            data_dir,
            out_dir,
            summary,
        } => {
            let args = ReportArgs {
                data_dir,
                out_dir,
                print_summary: summary,
            };

            // Validate args first
            validate_report_args(&args)?;

            execute_report(args)?;
        }

        Commands::Serve { data_dir, port } => {
            execute_serve(ServeArgs { data_dir, port })?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
