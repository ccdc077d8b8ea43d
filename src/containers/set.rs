// 🗂️ PersistentSet - Deduplicated collection backed by a JSON array
//
// Membership is decided by the identity policy given at construction.
// Hydrated once in open(); nothing is written until save() is called.

use crate::backing::BackingFile;
use crate::codec::JsonCodec;
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::identity::IdentityPolicy;
use crate::merge::MergeStrategy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::path::Path;

pub struct PersistentSet<T, I>
where
    I: IdentityPolicy<T>,
{
    items: HashMap<I::Key, T>,
    identity: I,
    file: BackingFile<JsonCodec>,
}

impl<T, I> PersistentSet<T, I>
where
    T: Serialize + DeserializeOwned,
    I: IdentityPolicy<T>,
{
    /// Open `<data_dir>/<name>.json` and merge it into `defaults`.
    ///
    /// Defaults always survive: file elements whose identity is already
    /// present are dropped.
    pub fn open(
        config: &StoreConfig,
        name: &str,
        identity: I,
        defaults: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::open_with_strategy(config, name, identity, defaults, MergeStrategy::Additive)
    }

    pub fn open_with_strategy(
        config: &StoreConfig,
        name: &str,
        identity: I,
        defaults: impl IntoIterator<Item = T>,
        strategy: MergeStrategy,
    ) -> Self {
        let mut set = PersistentSet {
            items: HashMap::new(),
            identity,
            file: BackingFile::new(config, name),
        };
        set.update(defaults);

        if let Some(loaded) = set.file.hydrate::<Vec<T>, _>(Vec::len) {
            for item in loaded {
                match strategy {
                    MergeStrategy::Additive => {
                        set.add(item);
                    }
                    MergeStrategy::Overwrite => {
                        set.replace(item);
                    }
                }
            }
        }

        set
    }

    /// Overwrite the backing file with every element
    pub fn save(&self) -> StoreResult<()> {
        let items: Vec<&T> = self.items.values().collect();
        self.file.persist::<_, Vec<T>>(&items, items.len())
    }
}

impl<T, I> PersistentSet<T, I>
where
    I: IdentityPolicy<T>,
{
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains_key(&self.identity.key(item))
    }

    /// Stored element sharing `item`'s identity
    pub fn get(&self, item: &T) -> Option<&T> {
        self.items.get(&self.identity.key(item))
    }

    /// Insert unless an element with the same identity exists.
    /// Returns false (and keeps the stored element) on a duplicate.
    pub fn add(&mut self, item: T) -> bool {
        match self.items.entry(self.identity.key(&item)) {
            hash_map::Entry::Occupied(_) => false,
            hash_map::Entry::Vacant(slot) => {
                slot.insert(item);
                true
            }
        }
    }

    /// Remove the element with `item`'s identity, if any
    pub fn discard(&mut self, item: &T) -> Option<T> {
        self.items.remove(&self.identity.key(item))
    }

    /// Discard-then-add: store `item` even if an equal-identity element exists
    pub fn replace(&mut self, item: T) -> Option<T> {
        self.items.insert(self.identity.key(&item), item)
    }

    pub fn update(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.add(item);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Unordered; order is only stable within one process run
    pub fn iter(&self) -> hash_map::Values<'_, I::Key, T> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn name(&self) -> &str {
        self.file.name()
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl<'a, T, I> IntoIterator for &'a PersistentSet<T, I>
where
    I: IdentityPolicy<T>,
{
    type Item = &'a T;
    type IntoIter = hash_map::Values<'a, I::Key, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}

impl<T, I> Extend<T> for PersistentSet<T, I>
where
    I: IdentityPolicy<T>,
{
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        self.update(iter);
    }
}

impl<T, I> fmt::Debug for PersistentSet<T, I>
where
    T: fmt::Debug,
    I: IdentityPolicy<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentSet")
            .field("path", &self.file.path())
            .field("items", &self.items.values().collect::<Vec<_>>())
            .finish()
    }
}
