//! Candidate source file discovery.
//!
//! Walks the project root and keeps regular files whose root-relative path
//! matches the configured glob. Recomputed by each stage; nothing is cached.
//! Symlinked files and directories are followed; link cycles are reported by
//! walkdir as entry errors and skipped.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const GLOB_META: &[char] = &['*', '?', '[', '{', '\\'];

/// Compile a project-relative glob. `*` stays within one directory; `**` spans any depth.
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid search pattern {pattern:?}"))?;
    Ok(glob.compile_matcher())
}

/// Leading path components of `pattern` that contain no glob syntax,
/// e.g. `app/components` for `app/components/**/*.tsx`.
pub fn literal_prefix(pattern: &str) -> PathBuf {
    pattern
        .split('/')
        .take_while(|part| !part.is_empty() && !part.contains(GLOB_META))
        .collect()
}

/// Whether a directory at root-relative `dir` can hold a match for a
/// pattern whose literal prefix is `prefix`.
fn may_contain_matches(dir: &Path, prefix: &Path) -> bool {
    prefix.starts_with(dir) || dir.starts_with(prefix)
}

/// Files under `root` matching `pattern`, sorted by path.
pub fn collect_candidates(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = compile_pattern(pattern)?;
    if !root.exists() {
        tracing::warn!(root = %root.display(), "project root does not exist");
        return Ok(Vec::new());
    }
    let prefix = literal_prefix(pattern);

    let walker = WalkDir::new(root).follow_links(true).into_iter();
    let walker = walker.filter_entry(|e| {
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        e.path()
            .strip_prefix(root)
            .map_or(true, |rel| may_contain_matches(rel, &prefix))
    });

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if matcher.is_match(relative) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
