use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::key::QueryKey;
use crate::api::Page;
use crate::log_debug;

#[derive(Clone, Debug)]
struct CacheEntry {
    page: Page<Value>,
    fetched_at: DateTime<Utc>,
}

/// Cache hasil list per namespace entitas dengan jendela freshness.
pub struct QueryCache {
    /// Map: namespace -> (key -> entry)
    entries: Mutex<HashMap<String, HashMap<QueryKey, CacheEntry>>>,
    stale_time: Duration,
}

impl QueryCache {
    pub fn new(stale_time: std::time::Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            stale_time: Duration::from_std(stale_time).unwrap_or_else(|_| Duration::seconds(5)),
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<Page<Value>> {
        self.get_at(key, Utc::now())
    }

    /// Hasil yang masih fresh pada waktu `now`. Entry kedaluwarsa dibuang.
    pub fn get_at(&self, key: &QueryKey, now: DateTime<Utc>) -> Option<Page<Value>> {
        let mut entries = self.entries.lock().ok()?;
        let bucket = entries.get_mut(key.namespace())?;

        match bucket.get(key) {
            Some(entry) if now < entry.fetched_at + self.stale_time => Some(entry.page.clone()),
            Some(_) => {
                bucket.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: QueryKey, page: Page<Value>) {
        self.insert_at(key, page, Utc::now());
    }

    pub fn insert_at(&self, key: QueryKey, page: Page<Value>, fetched_at: DateTime<Utc>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries
                .entry(key.namespace().to_string())
                .or_default()
                .insert(key, CacheEntry { page, fetched_at });
        }
    }

    /// Buang semua entry milik namespace. Mengembalikan jumlah entry yang dibuang.
    pub fn invalidate_namespace(&self, namespace: &str) -> usize {
        let removed = self
            .entries
            .lock()
            .ok()
            .and_then(|mut entries| entries.remove(namespace))
            .map(|bucket| bucket.len())
            .unwrap_or(0);

        log_debug!("CACHE", "namespace invalidated", serde_json::json!({
            "namespace": namespace,
            "removed": removed
        }));
        removed
    }

    pub fn invalidate_all(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .map(|entries| entries.values().map(HashMap::len).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
