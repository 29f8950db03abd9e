use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// In-memory key-value store shared by the `/val` handlers.
///
/// Keys are kept sorted so listings are deterministic. A poisoned lock is
/// recovered rather than propagated: every operation leaves the map in a
/// consistent state, so the data stays usable after a panicking writer.
#[derive(Debug, Default)]
pub struct Store {
    vals: RwLock<BTreeMap<String, Value>>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry as a JSON object.
    #[must_use]
    pub fn list(&self) -> Map<String, Value> {
        let vals = self.vals.read().unwrap_or_else(PoisonError::into_inner);
        vals.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let vals = self.vals.read().unwrap_or_else(PoisonError::into_inner);
        vals.get(key).cloned()
    }

    /// Insert or replace `key`.
    pub fn upsert(&self, key: impl Into<String>, value: Value) {
        let mut vals = self.vals.write().unwrap_or_else(PoisonError::into_inner);
        vals.insert(key.into(), value);
    }

    /// Remove `key`, returning the value it held.
    pub fn delete(&self, key: &str) -> Option<Value> {
        let mut vals = self.vals.write().unwrap_or_else(PoisonError::into_inner);
        vals.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vals.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upsert_get_delete() {
        let store = Store::new();
        store.upsert("kitty", json!("cat"));
        assert_eq!(store.get("kitty"), Some(json!("cat")));

        store.upsert("kitty", json!("lion"));
        assert_eq!(store.get("kitty"), Some(json!("lion")));
        assert_eq!(store.len(), 1);

        assert_eq!(store.delete("kitty"), Some(json!("lion")));
        assert_eq!(store.delete("kitty"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_is_sorted() {
        let store = Store::new();
        store.upsert("kitty", json!("cat"));
        store.upsert("gorilla", json!(123));
        let keys: Vec<_> = store.list().keys().cloned().collect();
        assert_eq!(keys, vec!["gorilla", "kitty"]);
    }
}
