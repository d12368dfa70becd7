//! CLI command handlers. Each command is in its own file.

mod config;
mod run;
mod scan;

pub use config::run_config;
pub use run::run_pipeline;
pub use scan::run_scan;
