// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Entities synthesized during one run, keyed by their pool identifier.
///
/// The generator consults the set before synthesizing: a key that is already
/// present is reused, so each identifier yields exactly one record.
/// Iteration follows key order.
#[derive(Debug, Clone)]
pub struct WorkingSet<K, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> Default for WorkingSet<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy, V> WorkingSet<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `key`, synthesizing it with `make` on first use.
    ///
    /// # Errors
    ///
    /// Propagates the error from `make`; the set is left unchanged.
    pub fn get_or_try_insert_with<E, F>(&mut self, key: K, make: F) -> Result<&V, E>
    where
        F: FnOnce(K) -> Result<V, E>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let value: V = make(key)?;
                Ok(&*entry.insert(value))
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: K) -> Option<&V> {
        self.entries.get(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the set, yielding values in key order.
    pub fn into_values(self) -> impl Iterator<Item = V> {
        self.entries.into_values()
    }
}
