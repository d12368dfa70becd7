//! Rewriter: replace fetched locators with local references, in place.
//!
//! Re-enumerates the file set itself. A file is written back only when its
//! content actually changed, so untouched files keep their mtime.

use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::SyncConfig;
use crate::file_set;
use crate::scanner::FileFailure;

/// Result of a rewrite pass.
#[derive(Debug, Clone, Default)]
pub struct RewriteReport {
    /// Number of candidate files examined.
    pub files_examined: usize,
    /// Files whose content changed and was saved.
    pub modified: Vec<PathBuf>,
    /// Files that could not be read or written.
    pub failures: Vec<FileFailure>,
}

impl RewriteReport {
    pub fn modified_count(&self) -> usize {
        self.modified.len()
    }
}

/// Substitution table ordered longest locator first, so a locator that is a
/// prefix of another never clobbers the longer one.
fn ordered_entries(mapping: &BTreeMap<String, String>) -> Vec<(&str, &str)> {
    let mut entries: Vec<(&str, &str)> = mapping
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
    entries
}

/// Replace every literal occurrence of each locator in `content`.
/// Returns `None` when nothing changed.
pub fn substitute(content: &str, mapping: &BTreeMap<String, String>) -> Option<String> {
    apply(content, &ordered_entries(mapping))
}

fn apply(content: &str, entries: &[(&str, &str)]) -> Option<String> {
    let mut current = content.to_owned();
    for &(locator, local_ref) in entries {
        if current.contains(locator) {
            current = current.replace(locator, local_ref);
        }
    }
    (current != content).then_some(current)
}

/// Rewrite all candidate files under the configured root using `mapping`.
///
/// Only an invalid search pattern is returned as an error; per-file failures
/// are logged and recorded in [`RewriteReport::failures`].
pub fn rewrite(cfg: &SyncConfig, mapping: &BTreeMap<String, String>) -> Result<RewriteReport> {
    let files = file_set::collect_candidates(&cfg.project_root, &cfg.search_pattern)?;
    let report = rewrite_files(files, mapping, |path, content| fs::write(path, content));
    tracing::info!("{} files were modified", report.modified_count());
    Ok(report)
}

/// Apply `mapping` to each of `files`, saving changed content through `write`.
fn rewrite_files<W>(
    files: Vec<PathBuf>,
    mapping: &BTreeMap<String, String>,
    mut write: W,
) -> RewriteReport
where
    W: FnMut(&Path, &str) -> io::Result<()>,
{
    let entries = ordered_entries(mapping);
    let mut report = RewriteReport {
        files_examined: files.len(),
        ..RewriteReport::default()
    };

    for path in files {
        match rewrite_file(&path, &entries, &mut write) {
            Ok(true) => report.modified.push(path),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), "error processing file: {}", e);
                report.failures.push(FileFailure {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }
    report
}

fn rewrite_file<W>(path: &Path, entries: &[(&str, &str)], write: &mut W) -> io::Result<bool>
where
    W: FnMut(&Path, &str) -> io::Result<()>,
{
    let original = fs::read_to_string(path)?;
    let Some(updated) = apply(&original, entries) else {
        return Ok(false);
    };
    tracing::debug!("updating paths in {}", path.display());
    write(path, &updated)?;
    Ok(true)
}
