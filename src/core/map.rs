//! An associative container keyed by identifiers.

use std::{
    collections::{hash_map, HashMap},
    ops::ControlFlow,
};

use crate::core::id::Id;

/// A map from arbitrary-precision identifiers to values.
///
/// Keys are hashed over their integer value, so identifiers built from differently sized
/// encodings of the same number address the same entry. The map isn't synchronised, access is
/// serialised by whichever table owns it.
#[derive(Debug, Clone)]
pub struct IdMap<T> {
    entries: HashMap<Id, T>,
}

impl<T> Default for IdMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> IdMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for a key, overwriting any previous value.
    pub fn set(&mut self, key: Id, value: T) {
        self.entries.insert(key, value);
    }

    /// Returns the value stored for the key, if any.
    pub fn get(&self, key: &Id) -> Option<&T> {
        self.entries.get(key)
    }

    /// Returns `true` if some value is associated with the key.
    pub fn contains(&self, key: &Id) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes the key, returning its value if it was present.
    pub fn remove(&mut self, key: &Id) -> Option<T> {
        self.entries.remove(key)
    }

    /// Calls `f` for each entry in an unspecified order, stopping early on
    /// [`ControlFlow::Break`].
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Id, &T) -> ControlFlow<()>,
    {
        for (key, value) in &self.entries {
            if f(key, value).is_break() {
                return;
            }
        }
    }

    /// Returns an arbitrary value, `None` if the map is empty.
    pub fn first(&self) -> Option<&T> {
        self.entries.values().next()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries in an unspecified order.
    pub fn iter(&self) -> hash_map::Iter<'_, Id, T> {
        self.entries.iter()
    }

    /// Returns an iterator over the values in an unspecified order.
    pub fn values(&self) -> hash_map::Values<'_, Id, T> {
        self.entries.values()
    }
}

impl<'a, T> IntoIterator for &'a IdMap<T> {
    type Item = (&'a Id, &'a T);
    type IntoIter = hash_map::Iter<'a, Id, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
