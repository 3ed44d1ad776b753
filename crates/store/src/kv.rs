use std::collections::HashMap;
use std::sync::RwLock;

use mealweek_shared::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// String values under string keys.
///
/// Typed stores layer JSON on top of this.
pub trait KeyValue {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValue + ?Sized> KeyValue for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore(RwLock<HashMap<String, String>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.0.read().map_err(|e| Error::Storage(e.to_string()))?;

        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.0.write().map_err(|e| Error::Storage(e.to_string()))?;
        map.insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.0.write().map_err(|e| Error::Storage(e.to_string()))?;
        map.remove(key);

        Ok(())
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(kv: &impl KeyValue, key: &str) -> Result<Option<T>> {
    let Some(raw) = kv.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| Error::Storage(format!("{key}: {e}")))
}

pub(crate) fn write_json<T: Serialize + ?Sized>(
    kv: &impl KeyValue,
    key: &str,
    value: &T,
) -> Result<()> {
    kv.set(key, &serde_json::to_string(value)?)
}
