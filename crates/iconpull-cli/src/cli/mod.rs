//! CLI for iconpull.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use iconpull_core::config::{self, SyncConfig};
use std::path::PathBuf;

use commands::{run_config, run_pipeline, run_scan};

/// Top-level CLI for iconpull.
#[derive(Debug, Parser)]
#[command(name = "iconpull")]
#[command(about = "iconpull: download remote SVG icons and point sources at the local copies", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Per-invocation overrides of values from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct Overrides {
    /// Project root to scan and rewrite.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Glob (relative to the root) selecting source files, e.g. "app/**/*.tsx".
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,
    /// Directory receiving downloaded icons (relative paths resolve against the root).
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(self, cfg: &mut SyncConfig) {
        if let Some(root) = self.root {
            cfg.project_root = root;
        }
        if let Some(pattern) = self.pattern {
            cfg.search_pattern = pattern;
        }
        if let Some(save_dir) = self.save_dir {
            cfg.save_dir = save_dir;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Scan, download every referenced icon, and rewrite sources to the local paths.
    Run {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// List the remote icon URLs found in sources (no downloads, no writes).
    Scan {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// Show the config file location and effective values.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run { overrides } => {
                overrides.apply(&mut cfg);
                run_pipeline(&cfg)?;
            }
            CliCommand::Scan { overrides } => {
                overrides.apply(&mut cfg);
                run_scan(&cfg)?;
            }
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
