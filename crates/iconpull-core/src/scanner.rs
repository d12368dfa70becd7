//! Scanner: collect the distinct locators referenced by the project's sources.

use anyhow::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SyncConfig;
use crate::file_set;
use crate::locator::LocatorPattern;

/// A file that could not be processed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Result of a scan pass.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Number of candidate files matched by the search pattern.
    pub files_searched: usize,
    /// Distinct locators found across all readable files.
    pub references: BTreeSet<String>,
    /// Files skipped because they could not be read as UTF-8 text.
    pub unreadable: Vec<FileFailure>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

/// Scan every candidate file under the configured root.
///
/// Only an invalid search pattern or origin is returned as an error; unreadable
/// files are logged and recorded in [`ScanReport::unreadable`].
pub fn scan(cfg: &SyncConfig) -> Result<ScanReport> {
    let pattern = LocatorPattern::new(&cfg.asset_origin)?;
    let files = file_set::collect_candidates(&cfg.project_root, &cfg.search_pattern)?;
    tracing::info!("found {} files to search", files.len());
    tracing::debug!(pattern = pattern.as_str(), "matching locators");

    let mut report = ScanReport {
        files_searched: files.len(),
        ..ScanReport::default()
    };
    for path in &files {
        match scan_file(path, &pattern) {
            Ok(found) => report.references.extend(found),
            Err(e) => {
                tracing::warn!(path = %path.display(), "error reading file: {}", e);
                report.unreadable.push(FileFailure {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!("found {} unique locators", report.references.len());
    Ok(report)
}

fn scan_file(path: &Path, pattern: &LocatorPattern) -> std::io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(pattern
        .find_all(&content)
        .into_iter()
        .map(str::to_owned)
        .collect())
}
