//! `iconpull config` – print config location and values.

use anyhow::Result;
use iconpull_core::config::{self, SyncConfig};

pub fn run_config(cfg: &SyncConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
