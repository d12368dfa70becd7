//! `iconpull scan` – dry run listing every locator found.

use anyhow::Result;
use iconpull_core::config::SyncConfig;
use iconpull_core::pipeline;

pub fn run_scan(cfg: &SyncConfig) -> Result<()> {
    let report = pipeline::scan(cfg)?;
    for locator in &report.references {
        println!("{locator}");
    }
    for failure in &report.unreadable {
        eprintln!("Error reading {}: {}", failure.path.display(), failure.error);
    }
    eprintln!(
        "{} unique icon URLs in {} files.",
        report.references.len(),
        report.files_searched
    );
    Ok(())
}
