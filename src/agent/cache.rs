//! Finalized Report Cache
//!
//! Bounded in-memory cache of finalized reports so repeated judge calls with
//! the same input never reach the completion provider twice. Eviction is
//! strictly first-in-first-out: reads do not refresh an entry.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::judge::FinalReport;
use crate::utils::canonical_json;

pub const REPORT_CACHE_CAPACITY: usize = 32;

/// Content hash of `(combined input, use case)`: sha256 over the canonical
/// JSON text, a newline, then the use case label.
pub fn cache_key(combined: &Value, use_case: &str) -> String {
    // Serializing a `Value` into memory cannot fail.
    let text = canonical_json(combined).unwrap_or_else(|_| combined.to_string());

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(b"\n");
    hasher.update(use_case.as_bytes());
    hex::encode(hasher.finalize())
}

struct CacheInner {
    entries: HashMap<String, Arc<FinalReport>>,
    order: VecDeque<String>,
}

/// Insertion-ordered cache of finalized reports
pub struct ReportCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::with_capacity(REPORT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(capacity + 1),
                order: VecDeque::with_capacity(capacity + 1),
            }),
            capacity: capacity.max(1),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<FinalReport>> {
        let inner = self.inner.lock().await;
        inner.entries.get(key).cloned()
    }

    /// Store `report` under `key` and return the value now held for the key.
    ///
    /// If another caller already stored the key, that value wins and is
    /// returned unchanged; the insertion ledger is not touched.
    pub async fn insert(&self, key: String, report: Arc<FinalReport>) -> Arc<FinalReport> {
        let mut inner = self.inner.lock().await;

        if let Some(existing) = inner.entries.get(&key) {
            return existing.clone();
        }

        inner.entries.insert(key.clone(), report.clone());
        inner.order.push_back(key);

        while inner.order.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
                tracing::debug!("Report cache evicted {}", &oldest[..12.min(oldest.len())]);
            }
        }

        report
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.inner.lock().await.entries.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.entries.clear();
        inner.order.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(tag: usize) -> Arc<FinalReport> {
        Arc::new(FinalReport::simplified(
            tag as u8,
            format!("use {}", tag),
            format!("danger {}", tag),
            format!("purify {}", tag),
        ))
    }

    #[tokio::test]
    async fn test_cache_get_insert() {
        let cache = ReportCache::new();
        let stored = cache.insert("k".into(), report(1)).await;

        let cached = cache.get("k").await.unwrap();
        assert!(Arc::ptr_eq(&stored, &cached));
        assert!(cache.get("other").await.is_none());
    }

    #[tokio::test]
    async fn test_evicts_in_insertion_order_even_after_read() {
        let cache = ReportCache::new();
        for i in 0..REPORT_CACHE_CAPACITY {
            cache.insert(format!("key-{}", i), report(i)).await;
        }
        assert_eq!(cache.len().await, 32);

        // Reading the oldest entry must not save it.
        assert!(cache.get("key-0").await.is_some());

        cache.insert("key-32".into(), report(32)).await;

        assert_eq!(cache.len().await, 32);
        assert!(!cache.contains("key-0").await);
        assert!(cache.contains("key-1").await);
        assert!(cache.contains("key-32").await);
    }

    #[tokio::test]
    async fn test_duplicate_insert_keeps_first_value() {
        let cache = ReportCache::with_capacity(2);
        let first = cache.insert("a".into(), report(1)).await;
        let second = cache.insert("a".into(), report(2)).await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len().await, 1);

        cache.insert("b".into(), report(3)).await;
        cache.insert("c".into(), report(4)).await;
        assert!(!cache.contains("a").await);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_never_exceed_capacity() {
        let cache = Arc::new(ReportCache::new());
        let mut handles = Vec::new();
        for i in 0..200 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.insert(format!("key-{}", i % 50), report(i % 50)).await;
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(cache.len().await, REPORT_CACHE_CAPACITY);
    }

    #[test]
    fn test_cache_key_depends_on_input_and_use_case() {
        let combined = json!({"scene_description": "murky pond"});
        let a = cache_key(&combined, "drinking");
        let b = cache_key(&combined, "irrigation");
        let c = cache_key(&json!({"scene_description": "clear pond"}), "drinking");

        assert_eq!(a.len(), 64);
        assert_eq!(a, cache_key(&combined, "drinking"));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cache_key_hashes_spaced_insertion_ordered_json() {
        // sha256 of "{\"b\": 1, \"a\": \"é\", \"c\": [1, 2]}\ndrinking"
        let combined: Value = serde_json::from_str(r#"{"b":1,"a":"é","c":[1,2]}"#).unwrap();
        assert_eq!(
            cache_key(&combined, "drinking"),
            "5a2a150435cebd22087496738e8ab61334c703541ea1996685d433409a235025"
        );
    }
}
