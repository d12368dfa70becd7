//! Per-download error type.

use std::io;
use std::path::PathBuf;

/// Why a single asset was not saved. Never aborts the batch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, TLS, timeout).
    #[error("{0}")]
    Transfer(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The locator has no usable final path segment.
    #[error("no filename in locator path")]
    NoFilename,
    /// Saving the body to disk failed.
    #[error("write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
