//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components to perform user tasks.

pub mod report;
pub mod serve;
pub mod utils;

// Re-export main command functions
pub use report::{execute_report, validate_report_args, ReportArgs};
pub use serve::{execute_serve, ServeArgs};
pub use utils::{display_schema, display_version, validate_report_file};
