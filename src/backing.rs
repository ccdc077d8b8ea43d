// 💾 Backing File - Best-effort hydrate, atomic persist
//
// Shared by all three containers. Hydrate never fails: a missing file is
// reported as Missing, an unreadable/undecodable one as Corrupt, and the
// caller keeps its defaults. Persist errors are returned to the caller.

use crate::codec::Codec;
use crate::config::StoreConfig;
use crate::diagnostics::{DiagnosticSink, StoreEvent};
use crate::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct BackingFile<C: Codec> {
    name: String,
    path: PathBuf,
    sink: Arc<dyn DiagnosticSink>,
    codec: PhantomData<C>,
}

impl<C: Codec> BackingFile<C> {
    pub fn new(config: &StoreConfig, name: &str) -> Self {
        BackingFile {
            name: name.to_string(),
            path: config.path_for(name, C::EXTENSION),
            sink: config.sink(),
            codec: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the backing file.
    ///
    /// Returns `None` when the file is missing or cannot be read/decoded; the
    /// reason goes to the diagnostic sink, never to the caller.
    /// `count` sizes the decoded payload for the Loaded event.
    pub fn hydrate<T, F>(&self, count: F) -> Option<T>
    where
        T: DeserializeOwned,
        F: FnOnce(&T) -> usize,
    {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.sink.record(&StoreEvent::Missing {
                    path: self.path.clone(),
                });
                return None;
            }
            Err(e) => {
                self.report_corrupt(e.to_string());
                return None;
            }
        };

        match C::decode::<T>(&bytes) {
            Ok(value) => {
                self.sink.record(&StoreEvent::Loaded {
                    path: self.path.clone(),
                    count: count(&value),
                });
                Some(value)
            }
            Err(e) => {
                self.report_corrupt(e.to_string());
                None
            }
        }
    }

    /// Encode `value` and overwrite the backing file.
    ///
    /// The encoded bytes must decode back as `D` (the type hydrate reads),
    /// otherwise nothing is written and `Unreadable` is returned.
    /// Creates the data directory if needed. Writes to `<file>.tmp` and
    /// renames, so the previous content survives a failed write.
    pub fn persist<T, D>(&self, value: &T, count: usize) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        let bytes = C::encode(value)?;
        if let Err(e) = C::decode::<D>(&bytes) {
            return Err(StoreError::Unreadable {
                path: self.path.clone(),
                reason: e.to_string(),
            });
        }

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
            }
        }

        let tmp_path = self.tmp_path();
        if let Err(e) = fs::write(&tmp_path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(&tmp_path, e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(&self.path, e));
        }

        self.sink.record(&StoreEvent::Persisted {
            path: self.path.clone(),
            count,
        });
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }

    fn report_corrupt(&self, reason: String) {
        self.sink.record(&StoreEvent::Corrupt {
            path: self.path.clone(),
            reason,
        });
    }
}

impl<C: Codec> fmt::Debug for BackingFile<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackingFile")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
