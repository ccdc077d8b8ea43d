// 📡 Diagnostics - Injected sink for hydrate/persist events
//
// Containers never talk to a global logger directly. They report events to the
// sink carried by their StoreConfig, so tests can observe load failures.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// ============================================================================
// STORE EVENT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// Backing file absent at hydrate time (not an error)
    Missing { path: PathBuf },

    /// Backing file read and decoded
    Loaded { path: PathBuf, count: usize },

    /// Backing file present but unreadable or undecodable; defaults kept
    Corrupt { path: PathBuf, reason: String },

    /// Container contents written to the backing file
    Persisted { path: PathBuf, count: usize },
}

impl StoreEvent {
    pub fn path(&self) -> &Path {
        match self {
            StoreEvent::Missing { path }
            | StoreEvent::Loaded { path, .. }
            | StoreEvent::Corrupt { path, .. }
            | StoreEvent::Persisted { path, .. } => path,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreEvent::Corrupt { .. })
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreEvent::Missing { path } => write!(f, "Creating new file {}", path.display()),
            StoreEvent::Loaded { path, count } => {
                write!(f, "Loaded {} items from {}", count, path.display())
            }
            StoreEvent::Corrupt { path, reason } => {
                write!(f, "Could not load data from {}: {}", path.display(), reason)
            }
            StoreEvent::Persisted { path, count } => {
                write!(f, "Saved {} items to {}", count, path.display())
            }
        }
    }
}

// ============================================================================
// SINKS
// ============================================================================

pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: &StoreEvent);
}

/// Default sink: forwards every event to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &StoreEvent) {
        match event {
            StoreEvent::Missing { path } => {
                tracing::info!(path = %path.display(), "Creating new file");
            }
            StoreEvent::Loaded { path, count } => {
                tracing::debug!(path = %path.display(), count, "Hydrated from disk");
            }
            StoreEvent::Corrupt { path, reason } => {
                tracing::warn!(path = %path.display(), %reason, "Could not load data");
            }
            StoreEvent::Persisted { path, count } => {
                tracing::info!(path = %path.display(), count, "Saved to disk");
            }
        }
    }
}

/// Keeps every event in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StoreEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn warnings(&self) -> Vec<StoreEvent> {
        self.events().into_iter().filter(StoreEvent::is_corrupt).collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, event: &StoreEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}
