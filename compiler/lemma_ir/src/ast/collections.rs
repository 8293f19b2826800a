//! Unordered name mappings and the total visibility table.
//!
//! `NameMap` deliberately hides its native iteration order behind
//! [`NameMap::sorted`]: every observable listing (comparison, hashing,
//! traversal, encoding, formatting) goes through the key-sorted form.

use std::fmt;
use std::ops::{Index, IndexMut};

use rustc_hash::FxHashMap;

use super::Visibility;
use crate::Name;

/// Unordered mapping from names to values.
#[derive(Clone)]
pub struct NameMap<V> {
    entries: FxHashMap<Name, V>,
}

impl<V> NameMap<V> {
    pub fn new() -> Self {
        NameMap {
            entries: FxHashMap::default(),
        }
    }

    /// Insert a binding, returning the value it replaced.
    pub fn insert(&mut self, name: Name, value: V) -> Option<V> {
        self.entries.insert(name, value)
    }

    /// Insert a binding only if `name` is unbound; otherwise hand `value` back.
    pub fn try_insert(&mut self, name: Name, value: V) -> Result<(), V> {
        if self.entries.contains_key(&name) {
            return Err(value);
        }
        self.entries.insert(name, value);
        Ok(())
    }

    pub fn get(&self, name: Name) -> Option<&V> {
        self.entries.get(&name)
    }

    pub fn contains_key(&self, name: Name) -> bool {
        self.entries.contains_key(&name)
    }

    pub(crate) fn remove(&mut self, name: Name) -> Option<V> {
        self.entries.remove(&name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical listing: bindings sorted by key.
    pub fn sorted(&self) -> Vec<(Name, &V)> {
        let mut pairs: Vec<(Name, &V)> = self.entries.iter().map(|(k, v)| (*k, v)).collect();
        pairs.sort_unstable_by_key(|(k, _)| *k);
        pairs
    }

    /// Canonical listing by value: bindings sorted by key.
    pub fn into_sorted(self) -> Vec<(Name, V)> {
        let mut pairs: Vec<(Name, V)> = self.entries.into_iter().collect();
        pairs.sort_unstable_by_key(|(k, _)| *k);
        pairs
    }

    /// Keys in canonical order.
    pub fn keys(&self) -> Vec<Name> {
        let mut keys: Vec<Name> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Rebuild the map through a fallible function, in canonical key order.
    pub fn try_map_values<U, Err>(
        self,
        mut f: impl FnMut(V) -> Result<U, Err>,
    ) -> Result<NameMap<U>, Err> {
        let mut out = FxHashMap::default();
        out.reserve(self.entries.len());
        for (name, value) in self.into_sorted() {
            out.insert(name, f(value)?);
        }
        Ok(NameMap { entries: out })
    }
}

impl<V> Default for NameMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(Name, V)> for NameMap<V> {
    fn from_iter<I: IntoIterator<Item = (Name, V)>>(iter: I) -> Self {
        NameMap {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for NameMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.sorted()).finish()
    }
}

/// A scope definitions table was built without one of its four buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("definition table is missing the `{0}` bucket")]
    MissingBucket(Visibility),
    #[error("definition table lists the `{0}` bucket twice")]
    DuplicateBucket(Visibility),
}

/// Total table indexed by [`Visibility`]: every bucket is always present.
#[derive(Clone, Debug)]
pub struct VisibilityTable<T> {
    buckets: [T; 4],
}

impl<T> VisibilityTable<T> {
    pub fn from_fn(mut f: impl FnMut(Visibility) -> T) -> Self {
        VisibilityTable {
            buckets: [
                f(Visibility::Hidden),
                f(Visibility::Private),
                f(Visibility::Protected),
                f(Visibility::Public),
            ],
        }
    }

    /// Build a table from explicit `(bucket, value)` entries.
    ///
    /// A partial table is rejected, as is a bucket given twice.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Visibility, T)>,
    ) -> Result<Self, TableError> {
        let mut slots: [Option<T>; 4] = [None, None, None, None];
        for (visibility, value) in entries {
            let slot = &mut slots[visibility.index()];
            if slot.is_some() {
                return Err(TableError::DuplicateBucket(visibility));
            }
            *slot = Some(value);
        }

        match slots {
            [Some(hidden), Some(private), Some(protected), Some(public)] => Ok(VisibilityTable {
                buckets: [hidden, private, protected, public],
            }),
            slots => {
                let missing = Visibility::ALL
                    .iter()
                    .zip(slots.iter())
                    .find_map(|(vis, slot)| slot.is_none().then_some(*vis))
                    .unwrap_or(Visibility::Hidden);
                Err(TableError::MissingBucket(missing))
            }
        }
    }

    pub fn get(&self, visibility: Visibility) -> &T {
        &self.buckets[visibility.index()]
    }

    /// Buckets in visibility order.
    pub fn iter(&self) -> impl Iterator<Item = (Visibility, &T)> {
        Visibility::ALL.iter().copied().zip(self.buckets.iter())
    }

    pub fn try_map<U, Err>(
        self,
        mut f: impl FnMut(Visibility, T) -> Result<U, Err>,
    ) -> Result<VisibilityTable<U>, Err> {
        let [hidden, private, protected, public] = self.buckets;
        Ok(VisibilityTable {
            buckets: [
                f(Visibility::Hidden, hidden)?,
                f(Visibility::Private, private)?,
                f(Visibility::Protected, protected)?,
                f(Visibility::Public, public)?,
            ],
        })
    }

    pub(crate) fn buckets(&self) -> &[T; 4] {
        &self.buckets
    }
}

impl<T: Default> Default for VisibilityTable<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<Visibility> for VisibilityTable<T> {
    type Output = T;

    fn index(&self, visibility: Visibility) -> &T {
        self.get(visibility)
    }
}

impl<T> IndexMut<Visibility> for VisibilityTable<T> {
    fn index_mut(&mut self, visibility: Visibility) -> &mut T {
        &mut self.buckets[visibility.index()]
    }
}
