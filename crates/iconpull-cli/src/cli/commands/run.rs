//! `iconpull run` – scan, fetch, rewrite.

use anyhow::Result;
use iconpull_core::config::SyncConfig;
use iconpull_core::fetcher::{FetchEvent, FetchOutcome};
use iconpull_core::pipeline::{self, Progress};

pub fn run_pipeline(cfg: &SyncConfig) -> Result<()> {
    println!("--- Starting icon link replacement ---");
    let report = pipeline::run_with(cfg, |progress| print_progress(cfg, progress))?;
    println!("\nFinished! {} files were modified.", report.modified_count());
    Ok(())
}

fn print_progress(cfg: &SyncConfig, progress: Progress<'_>) {
    match progress {
        Progress::Scanned(scan) => {
            println!("Found {} files to search.", scan.files_searched);
            for failure in &scan.unreadable {
                println!("Error reading {}: {}", failure.path.display(), failure.error);
            }
            println!("Found {} unique icon URLs.", scan.references.len());
        }
        Progress::Fetch(FetchEvent::Started {
            locator,
            index,
            total,
        }) => {
            println!("[{index}/{total}] Downloading {locator}");
        }
        Progress::Fetch(FetchEvent::Finished(outcome)) => match outcome {
            FetchOutcome::Saved { path, bytes, .. } => {
                println!("  saved {} ({} bytes)", path.display(), bytes);
            }
            FetchOutcome::Failed { error, .. } => {
                println!("  Failed to download {}: {}", outcome.locator(), error);
            }
        },
        Progress::Fetched(fetch) => {
            println!(
                "Downloaded {} of {} icons into {}.",
                fetch.saved_count(),
                fetch.outcomes.len(),
                cfg.resolved_save_dir().display()
            );
            if fetch.collisions > 0 {
                println!(
                    "Warning: {} icon(s) shared a filename with another URL and were overwritten.",
                    fetch.collisions
                );
            }
        }
        Progress::Rewritten(rewrite) => {
            for path in &rewrite.modified {
                println!("Updated paths in {}", path.display());
            }
            for failure in &rewrite.failures {
                println!("Error processing {}: {}", failure.path.display(), failure.error);
            }
        }
    }
}
