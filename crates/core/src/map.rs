//! Keyed, unordered association of owned tagged values with unique keys.
//!
//! Keys are compared by raw content bytes plus declared size, independent of
//! the kind tag, so an `Int64(5)` key and a `Size(5)` key collide on a
//! 64-bit target. Kinds whose payload is not unambiguous raw content (null,
//! generic, nested containers) are rejected as keys. Values follow the same
//! ownership contract as [`List`](crate::list::List) slots: exclusively
//! owned, deep-copied on value-semantics insertion, destroyed on
//! replacement, removal, or drop.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::ContainerError;
use crate::value::{Opaque, Value, ValueKind};

/// The raw content bytes a key is compared and hashed by.
fn key_bytes(key: &Value) -> Option<Vec<u8>> {
    match key {
        Value::Bool(b) => Some(vec![u8::from(*b)]),
        Value::Char(c) => Some((*c as u32).to_le_bytes().to_vec()),
        Value::Double(d) => Some(d.to_bits().to_le_bytes().to_vec()),
        Value::Int64(i) => Some(i.to_le_bytes().to_vec()),
        Value::Size(s) => Some((*s as u64).to_le_bytes().to_vec()),
        Value::Str(s) => Some(s.as_bytes().to_vec()),
        Value::Null | Value::List(_) | Value::Map(_) | Value::Generic(_) => None,
    }
}

struct Entry {
    key: Value,
    value: Value,
}

/// An unordered container of unique-key pairs of exclusively-owned
/// [`Value`]s.
///
/// The internal strategy is a hash table over the raw key bytes; only the
/// external contract (unique keys, replace-in-place `set`, deep copy) is
/// load-bearing.
#[derive(Default)]
pub struct Map {
    entries: HashMap<Vec<u8>, Entry>,
}

impl Map {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Deep copy: every pair is copy-constructed. On failure the partial
    /// copy is dropped and the source is untouched.
    pub fn copy(&self) -> Result<Self, ContainerError> {
        let mut copy = Self::new();
        copy.entries.try_reserve(self.entries.len())?;
        for entry in self.entries.values() {
            copy.set(&entry.key, entry.value.clone())?;
        }
        Ok(copy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Associate `value` with `key`.
    ///
    /// An existing key keeps its stored key payload; only the value is
    /// destroyed and replaced in place. Keys must be of a raw-content kind.
    pub fn set(&mut self, key: &Value, value: Value) -> Result<(), ContainerError> {
        let Some(bytes) = key_bytes(key) else {
            warn!(operation = "set", kind = %key.kind(), "kind is not usable as a map key");
            return Err(ContainerError::InvalidKey(key.kind()));
        };

        match self.entries.get_mut(&bytes) {
            Some(entry) => {
                entry.value = value;
            }
            None => {
                self.entries.try_reserve(1)?;
                self.entries.insert(
                    bytes,
                    Entry {
                        key: key.clone(),
                        value,
                    },
                );
            }
        }

        Ok(())
    }

    /// Borrow the value stored under `key`, if present. A missing key is a
    /// not-found indication; the map is never mutated by lookups.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        let bytes = key_bytes(key)?;
        let entry = self.entries.get(&bytes);
        if entry.is_none() {
            debug!(operation = "get", kind = %key.kind(), "key not found");
        }
        entry.map(|e| &e.value)
    }

    /// Borrow the opaque payload stored under `key`.
    pub fn get_generic(&self, key: &Value) -> Option<&dyn Opaque> {
        self.get(key)?.as_generic()
    }

    /// Downcast the generic payload stored under `key` to a concrete type.
    pub fn downcast_ref<T: std::any::Any>(&self, key: &Value) -> Option<&T> {
        self.get(key)?.downcast_ref::<T>()
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        match key_bytes(key) {
            Some(bytes) => self.entries.contains_key(&bytes),
            None => false,
        }
    }

    /// Remove and destroy the pair stored under `key`. Returns whether a
    /// pair existed.
    pub fn remove(&mut self, key: &Value) -> bool {
        match key_bytes(key) {
            Some(bytes) => self.entries.remove(&bytes).is_some(),
            None => false,
        }
    }

    /// Iterate over the stored pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.values().map(|entry| (&entry.key, &entry.value))
    }
}

impl std::fmt::Debug for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.values().map(|e| (&e.key, &e.value)))
            .finish()
    }
}

impl Clone for Map {
    fn clone(&self) -> Self {
        // Clone cannot report failure; `copy` is the checked deep-copy path.
        let mut entries = HashMap::with_capacity(self.entries.len());
        for (bytes, entry) in &self.entries {
            entries.insert(
                bytes.clone(),
                Entry {
                    key: entry.key.clone(),
                    value: entry.value.clone(),
                },
            );
        }
        Self { entries }
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(bytes, entry)| {
                other
                    .entries
                    .get(bytes)
                    .is_some_and(|theirs| theirs.value == entry.value)
            })
    }
}
