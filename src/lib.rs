// Budget Store - Core Library
// Disk-backed set, sequence and mapping containers for the budget app

pub mod backing;
pub mod codec;
pub mod config;
pub mod containers;
pub mod diagnostics;
pub mod entry;
pub mod error;
pub mod identity;
pub mod merge;

// Re-export commonly used types
pub use codec::{BincodeCodec, Codec, JsonCodec};
pub use config::{StoreConfig, DATA_DIR_ENV, DEFAULT_DATA_DIR};
pub use containers::{PersistentMapping, PersistentSequence, PersistentSet};
pub use diagnostics::{DiagnosticSink, MemorySink, StoreEvent, TracingSink};
pub use entry::Entry;
pub use error::{StoreError, StoreResult};
pub use identity::{EntryFullIdentity, EntryIdentity, FnIdentity, IdentityPolicy, Intrinsic};
pub use merge::MergeStrategy;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Logical name of the recorded entries set
pub const ENTRIES: &str = "entries";

/// Logical name of the category → sub-categories mapping
pub const CATEGORIES: &str = "categories";
