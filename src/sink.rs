//! Write-only side channel for raw response bodies.
//!
//! Snapshots exist for offline inspection of the portal's answers; nothing
//! in the login flow reads them back.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Destination for fixed-name response body snapshots.
pub trait BodySink: Send + Sync {
    fn persist(&self, name: &str, body: &str) -> io::Result<()>;
}

/// Filesystem sink writing one file per snapshot name, overwriting any
/// previous capture.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new(".")
    }
}

impl BodySink for FileSink {
    fn persist(&self, name: &str, body: &str) -> io::Result<()> {
        fs::write(self.dir.join(name), body)
    }
}
