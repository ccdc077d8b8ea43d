// 📜 PersistentSequence - Ordered list backed by a bincode blob
//
// File content is appended after the defaults on open (Additive).
// save() rewrites the whole blob; there is no incremental persistence.

use crate::backing::BackingFile;
use crate::codec::BincodeCodec;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::merge::MergeStrategy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::Path;

pub struct PersistentSequence<T> {
    items: Vec<T>,
    file: BackingFile<BincodeCodec>,
}

impl<T> PersistentSequence<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open `<data_dir>/<name>.bin`; loaded elements follow `defaults`
    pub fn open(config: &StoreConfig, name: &str, defaults: impl IntoIterator<Item = T>) -> Self {
        Self::open_with_strategy(config, name, defaults, MergeStrategy::Additive)
    }

    pub fn open_with_strategy(
        config: &StoreConfig,
        name: &str,
        defaults: impl IntoIterator<Item = T>,
        strategy: MergeStrategy,
    ) -> Self {
        let file = BackingFile::new(config, name);
        let mut items: Vec<T> = defaults.into_iter().collect();

        if let Some(loaded) = file.hydrate::<Vec<T>, _>(Vec::len) {
            match strategy {
                MergeStrategy::Additive => items.extend(loaded),
                MergeStrategy::Overwrite => items = loaded,
            }
        }

        PersistentSequence { items, file }
    }

    /// Overwrite the backing file with the whole sequence
    pub fn save(&self) -> StoreResult<()> {
        self.file.persist::<_, Vec<T>>(&self.items, self.items.len())
    }
}

impl<T> PersistentSequence<T> {
    pub fn get(&self, index: usize) -> StoreResult<&T> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })
    }

    /// Replace the element at `index`, returning the old one
    pub fn set(&mut self, index: usize, item: T) -> StoreResult<T> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.items[index], item))
    }

    /// Remove and return the element at `index`, shifting the rest left
    pub fn delete(&mut self, index: usize) -> StoreResult<T> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Insert before `index`; `index == len()` appends
    pub fn insert(&mut self, index: usize, item: T) -> StoreResult<()> {
        let len = self.items.len();
        if index > len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        self.items.insert(index, item);
        Ok(())
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn name(&self) -> &str {
        self.file.name()
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        let len = self.items.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        Ok(())
    }
}

impl<'a, T> IntoIterator for &'a PersistentSequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Extend<T> for PersistentSequence<T> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        self.items.extend(iter);
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentSequence")
            .field("path", &self.file.path())
            .field("items", &self.items)
            .finish()
    }
}
