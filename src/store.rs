//! Key-value stores which back properties.
//!
//! Values are held as [`serde_json::Value`]s, and converted to the property's type when read.
//! A value which is missing, or can't be converted, reads as absent.

use std::{collections::BTreeMap, sync::Arc};

use parking_lot::{RwLock, const_rwlock};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Store used when nothing more specific is required.
pub static STANDARD: MemoryStore = MemoryStore::new("standard");

/// A key-value store that properties can be persisted in.
pub trait Store {
    /// Raw value stored under `key`, if any.
    fn get_value(&self, key: &str) -> Option<Value>;

    /// Replace the value stored under `key`.
    fn set_value(&self, key: &str, value: Value);

    /// Remove any value stored under `key`.
    fn remove(&self, key: &str);

    /// Read the value under `key` as `T`. Produces `None` if there is no value, or if it can't
    /// be converted to `T`.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        let value = self.get_value(key)?;

        match serde_json::from_value(value) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(key, %error, "stored value does not match the requested type");
                None
            }
        }
    }

    /// Write `value` under `key`. Values which serialise to `null` (such as `None`) remove the
    /// key instead.
    fn set<T: Serialize>(&self, key: &str, value: T)
    where
        Self: Sized,
    {
        match serde_json::to_value(value) {
            Ok(Value::Null) => self.remove(key),
            Ok(value) => self.set_value(key, value),
            Err(error) => {
                tracing::warn!(key, %error, "value could not be serialised, store left unchanged");
            }
        }
    }
}

impl<S: Store + ?Sized> Store for &S {
    fn get_value(&self, key: &str) -> Option<Value> {
        (**self).get_value(key)
    }

    fn set_value(&self, key: &str, value: Value) {
        (**self).set_value(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn get_value(&self, key: &str) -> Option<Value> {
        (**self).get_value(key)
    }

    fn set_value(&self, key: &str, value: Value) {
        (**self).set_value(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// In-memory [`Store`]. Can be constructed in a `static`, so each named instance acts as a
/// separate suite of values:
///
/// ```
/// use observable_defaults::store::{MemoryStore, Store};
///
/// static GROUP: MemoryStore = MemoryStore::new("group");
///
/// GROUP.set("theme", "dark");
/// assert_eq!(GROUP.get::<String>("theme").as_deref(), Some("dark"));
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    name: &'static str,
    values: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            values: const_rwlock(BTreeMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// Copy of every value currently held.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.values.read().clone()
    }

    pub fn clear(&self) {
        self.values.write().clear();
        tracing::trace!(store = self.name, "cleared");
    }
}

impl Store for MemoryStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        let value = self.values.read().get(key).cloned();
        tracing::trace!(store = self.name, key, found = value.is_some(), "read");
        value
    }

    fn set_value(&self, key: &str, value: Value) {
        tracing::trace!(store = self.name, key, "write");
        self.values.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        tracing::trace!(store = self.name, key, "remove");
        self.values.write().remove(key);
    }
}
