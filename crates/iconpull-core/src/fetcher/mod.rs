//! Fetcher: download each locator into the save directory.
//!
//! Downloads run one after another. Each locator succeeds or fails on its
//! own; failures are logged, recorded as [`FetchOutcome::Failed`], and left
//! out of the mapping handed to the rewriter.

mod error;
mod http;

pub use error::FetchError;

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::SyncConfig;
use crate::locator::filename_from_locator;

/// What happened to one locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Saved {
        locator: String,
        local_ref: String,
        path: PathBuf,
        bytes: u64,
    },
    Failed {
        locator: String,
        error: String,
    },
}

impl FetchOutcome {
    pub fn locator(&self) -> &str {
        match self {
            FetchOutcome::Saved { locator, .. } | FetchOutcome::Failed { locator, .. } => {
                locator.as_str()
            }
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, FetchOutcome::Saved { .. })
    }
}

/// Result of a fetch batch.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// One entry per attempted locator, in attempt order.
    pub outcomes: Vec<FetchOutcome>,
    /// Locator -> local reference, successful downloads only.
    pub mapping: BTreeMap<String, String>,
    /// Saves that overwrote a file written earlier in the same batch by a
    /// different locator with the same filename.
    pub collisions: usize,
}

impl FetchReport {
    pub fn saved_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.saved_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            FetchOutcome::Failed { locator, error } => Some((locator.as_str(), error.as_str())),
            FetchOutcome::Saved { .. } => None,
        })
    }
}

/// Progress notification emitted while a batch runs.
#[derive(Debug, Clone, Copy)]
pub enum FetchEvent<'a> {
    /// About to request `locator`; `index` counts from 1.
    Started {
        locator: &'a str,
        index: usize,
        total: usize,
    },
    /// The attempt for one locator ended.
    Finished(&'a FetchOutcome),
}

/// Download every locator in `references`.
///
/// Returns `Err` only when the save directory cannot be created.
pub fn fetch_all(cfg: &SyncConfig, references: &BTreeSet<String>) -> Result<FetchReport> {
    fetch_all_with(cfg, references, |_| {})
}

/// Like [`fetch_all`], reporting each download to `on_event` as it starts and ends.
pub fn fetch_all_with<F>(
    cfg: &SyncConfig,
    references: &BTreeSet<String>,
    mut on_event: F,
) -> Result<FetchReport>
where
    F: FnMut(FetchEvent<'_>),
{
    let save_dir = cfg.resolved_save_dir();
    if !save_dir.is_dir() {
        fs::create_dir_all(&save_dir)
            .with_context(|| format!("create save dir {}", save_dir.display()))?;
        tracing::info!("created directory: {}", save_dir.display());
    }

    let timeout = cfg.fetch_timeout_secs.map(Duration::from_secs);
    let mut report = FetchReport::default();
    // filename -> first locator saved under it
    let mut saved_names: BTreeMap<String, String> = BTreeMap::new();

    let total = references.len();
    for (i, locator) in references.iter().enumerate() {
        on_event(FetchEvent::Started {
            locator,
            index: i + 1,
            total,
        });
        match fetch_one(cfg, &save_dir, locator, timeout) {
            Ok((filename, path, bytes)) => {
                if let Some(previous) = saved_names.get(&filename) {
                    if previous != locator {
                        report.collisions += 1;
                        tracing::warn!(
                            filename = %filename,
                            previous = %previous,
                            locator = %locator,
                            "filename collision: overwrote asset saved for another locator"
                        );
                    }
                } else {
                    saved_names.insert(filename.clone(), locator.clone());
                }
                let local_ref = cfg.local_reference(&filename);
                tracing::info!(bytes, "downloaded and saved {}", filename);
                report.mapping.insert(locator.clone(), local_ref.clone());
                report.outcomes.push(FetchOutcome::Saved {
                    locator: locator.clone(),
                    local_ref,
                    path,
                    bytes,
                });
            }
            Err(e) => {
                tracing::warn!(locator = %locator, "failed to download: {}", e);
                report.outcomes.push(FetchOutcome::Failed {
                    locator: locator.clone(),
                    error: e.to_string(),
                });
            }
        }
        if let Some(outcome) = report.outcomes.last() {
            on_event(FetchEvent::Finished(outcome));
        }
    }

    tracing::info!(
        saved = report.saved_count(),
        failed = report.failed_count(),
        collisions = report.collisions,
        "fetch finished"
    );
    Ok(report)
}

fn fetch_one(
    cfg: &SyncConfig,
    save_dir: &Path,
    locator: &str,
    timeout: Option<Duration>,
) -> Result<(String, PathBuf, u64), FetchError> {
    let filename = filename_from_locator(locator).ok_or(FetchError::NoFilename)?;
    let body = http::get(locator, &cfg.user_agent, timeout)?;
    let path = save_dir.join(&filename);
    fs::write(&path, &body).map_err(|source| FetchError::Write {
        path: path.clone(),
        source,
    })?;
    Ok((filename, path, body.len() as u64))
}
