// ⚙️ Store Configuration - Base directory + diagnostic sink
//
// Passed explicitly to every container so tests can point each one at an
// isolated directory.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory used when nothing else is configured (relative to the cwd)
pub const DEFAULT_DATA_DIR: &str = ".data";

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "BUDGET_DATA_DIR";

#[derive(Clone)]
pub struct StoreConfig {
    data_dir: PathBuf,
    sink: Arc<dyn DiagnosticSink>,
}

impl StoreConfig {
    /// Config rooted at `data_dir`, logging through `tracing`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Read the data directory from `BUDGET_DATA_DIR`, falling back to `.data`
    pub fn from_env() -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => StoreConfig::new(dir),
            _ => StoreConfig::default(),
        }
    }

    /// Replace the diagnostic sink
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn sink(&self) -> Arc<dyn DiagnosticSink> {
        Arc::clone(&self.sink)
    }

    /// Backing file for a logical name: `<data_dir>/<name>.<extension>`
    pub fn path_for(&self, name: &str, extension: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", name, extension))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_DATA_DIR)
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("data_dir", &self.data_dir)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_dir() {
        let config = StoreConfig::default();
        assert_eq!(config.data_dir(), Path::new(".data"));
    }

    #[test]
    fn test_path_for() {
        let config = StoreConfig::new("/var/budget");
        assert_eq!(
            config.path_for("entries", "json"),
            PathBuf::from("/var/budget/entries.json")
        );
        assert_eq!(
            config.path_for("history", "bin"),
            PathBuf::from("/var/budget/history.bin")
        );
    }
}
