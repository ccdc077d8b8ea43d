// 🗺️ PersistentMapping - Key/value store backed by a JSON object
//
// Unlike the set and sequence, file entries overwrite default keys on open.
// save_to_disk() rewrites the whole object.

use crate::backing::BackingFile;
use crate::codec::JsonCodec;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::merge::MergeStrategy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::hash::Hash;
use std::path::Path;

pub struct PersistentMapping<K, V> {
    items: HashMap<K, V>,
    file: BackingFile<JsonCodec>,
}

impl<K, V> PersistentMapping<K, V>
where
    K: Eq + Hash + Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    /// Open `<data_dir>/<name>.json`; file values win over `defaults`.
    ///
    /// Keys must serialize as JSON object keys (strings or integers).
    pub fn open(
        config: &StoreConfig,
        name: &str,
        defaults: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self::open_with_strategy(config, name, defaults, MergeStrategy::Overwrite)
    }

    pub fn open_with_strategy(
        config: &StoreConfig,
        name: &str,
        defaults: impl IntoIterator<Item = (K, V)>,
        strategy: MergeStrategy,
    ) -> Self {
        let file = BackingFile::new(config, name);
        let mut items: HashMap<K, V> = defaults.into_iter().collect();

        if let Some(loaded) = file.hydrate::<HashMap<K, V>, _>(HashMap::len) {
            match strategy {
                MergeStrategy::Overwrite => items.extend(loaded),
                MergeStrategy::Additive => {
                    for (key, value) in loaded {
                        items.entry(key).or_insert(value);
                    }
                }
            }
        }

        PersistentMapping { items, file }
    }

    /// Overwrite the backing file with every entry
    pub fn save_to_disk(&self) -> StoreResult<()> {
        self.file.persist::<_, HashMap<K, V>>(&self.items, self.items.len())
    }
}

impl<K, V> PersistentMapping<K, V>
where
    K: Eq + Hash + fmt::Debug,
{
    pub fn get(&self, key: &K) -> StoreResult<&V> {
        self.items.get(key).ok_or_else(|| missing(key))
    }

    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.items.get(key).unwrap_or(default)
    }

    /// Insert or replace, returning the previous value
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.items.insert(key, value)
    }

    pub fn delete(&mut self, key: &K) -> StoreResult<V> {
        self.items.remove(key).ok_or_else(|| missing(key))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.items.contains_key(key)
    }

    /// Merge entries in; later pairs win
    pub fn update(&mut self, entries: impl IntoIterator<Item = (K, V)>) {
        self.items.extend(entries);
    }

    /// `entries` first, then `overrides` on top
    pub fn update_with_overrides(
        &mut self,
        entries: impl IntoIterator<Item = (K, V)>,
        overrides: impl IntoIterator<Item = (K, V)>,
    ) {
        self.items.extend(entries);
        self.items.extend(overrides);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn keys(&self) -> hash_map::Keys<'_, K, V> {
        self.items.keys()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn name(&self) -> &str {
        self.file.name()
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

fn missing<K: fmt::Debug>(key: &K) -> StoreError {
    StoreError::KeyNotFound(format!("{:?}", key))
}

impl<'a, K, V> IntoIterator for &'a PersistentMapping<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<K: Eq + Hash, V> Extend<(K, V)> for PersistentMapping<K, V> {
    fn extend<It: IntoIterator<Item = (K, V)>>(&mut self, iter: It) {
        self.items.extend(iter);
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for PersistentMapping<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentMapping")
            .field("path", &self.file.path())
            .field("items", &self.items)
            .finish()
    }
}
