//! Scanner -> Fetcher -> Rewriter, with the two early exits:
//! no locators found, and no successful downloads.

use anyhow::Result;

use crate::config::SyncConfig;
use crate::fetcher::{self, FetchEvent, FetchReport};
use crate::rewriter::{self, RewriteReport};
use crate::scanner::{self, ScanReport};

/// Outcome of a full run. `None` marks a stage skipped by an early exit.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub scan: ScanReport,
    pub fetch: Option<FetchReport>,
    pub rewrite: Option<RewriteReport>,
}

impl PipelineReport {
    pub fn modified_count(&self) -> usize {
        self.rewrite.as_ref().map_or(0, RewriteReport::modified_count)
    }
}

/// Scan only; no network, no writes.
pub fn scan(cfg: &SyncConfig) -> Result<ScanReport> {
    scanner::scan(cfg)
}

/// Stage boundaries and per-download steps, in the order they happen.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    Scanned(&'a ScanReport),
    Fetch(FetchEvent<'a>),
    Fetched(&'a FetchReport),
    Rewritten(&'a RewriteReport),
}

/// Run all three stages in order.
pub fn run(cfg: &SyncConfig) -> Result<PipelineReport> {
    run_with(cfg, |_| {})
}

/// Like [`run`], reporting progress to `on_progress` as each step completes.
pub fn run_with<F>(cfg: &SyncConfig, mut on_progress: F) -> Result<PipelineReport>
where
    F: FnMut(Progress<'_>),
{
    let scan = scanner::scan(cfg)?;
    on_progress(Progress::Scanned(&scan));
    if scan.is_empty() {
        tracing::info!("no locators found; nothing to fetch");
        return Ok(PipelineReport {
            scan,
            ..PipelineReport::default()
        });
    }

    let fetch = fetcher::fetch_all_with(cfg, &scan.references, |event| {
        on_progress(Progress::Fetch(event))
    })?;
    on_progress(Progress::Fetched(&fetch));
    if fetch.mapping.is_empty() {
        tracing::info!("no assets downloaded; nothing to rewrite");
        return Ok(PipelineReport {
            scan,
            fetch: Some(fetch),
            rewrite: None,
        });
    }

    let rewrite = rewriter::rewrite(cfg, &fetch.mapping)?;
    on_progress(Progress::Rewritten(&rewrite));
    Ok(PipelineReport {
        scan,
        fetch: Some(fetch),
        rewrite: Some(rewrite),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_input_skips_fetch_and_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("app/page.tsx");
        fs::create_dir_all(page.parent().unwrap()).unwrap();
        fs::write(&page, "<div>no icons</div>").unwrap();

        let cfg = SyncConfig::for_root(dir.path());
        let report = run(&cfg).unwrap();
        assert_eq!(report.scan.files_searched, 1);
        assert!(report.fetch.is_none());
        assert!(report.rewrite.is_none());
        assert_eq!(report.modified_count(), 0);
        // save dir is only created once there is something to fetch
        assert!(!dir.path().join("public/icons").exists());
    }

    #[test]
    fn all_downloads_failing_skips_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("app/page.tsx");
        fs::create_dir_all(page.parent().unwrap()).unwrap();
        let original = "<img src=\"http://127.0.0.1:1/show/x.svg\"/>";
        fs::write(&page, original).unwrap();

        let mut cfg = SyncConfig::for_root(dir.path());
        cfg.asset_origin = "http://127.0.0.1:1/show/".to_string();
        cfg.fetch_timeout_secs = Some(5);
        let mut steps = Vec::new();
        let report = run_with(&cfg, |p| {
            steps.push(match p {
                Progress::Scanned(_) => "scanned",
                Progress::Fetch(FetchEvent::Started { .. }) => "download started",
                Progress::Fetch(FetchEvent::Finished(_)) => "download finished",
                Progress::Fetched(_) => "fetched",
                Progress::Rewritten(_) => "rewritten",
            })
        })
        .unwrap();
        assert_eq!(
            steps,
            vec!["scanned", "download started", "download finished", "fetched"]
        );

        let fetch = report.fetch.as_ref().unwrap();
        assert_eq!(fetch.failed_count(), 1);
        assert!(report.rewrite.is_none());
        assert_eq!(fs::read_to_string(&page).unwrap(), original);
    }
}
