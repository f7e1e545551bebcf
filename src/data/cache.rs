use crate::types::TestCase;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Memo of resolved task case sets, shared across the scoring workers.
pub struct CaseCache {
    data: Mutex<HashMap<&'static str, Arc<[TestCase]>>>,
    capacity: usize,
}

impl CaseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Mutex::new(HashMap::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<[TestCase]>> {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.get(key).cloned()
    }

    pub fn set(&self, key: &'static str, value: Arc<[TestCase]>) {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        if data.len() >= self.capacity && !data.contains_key(key) {
            // A simple eviction strategy: clear the cache when full.
            data.clear();
        }
        data.insert(key, value);
    }

    pub fn get_or_insert_with<F>(&self, key: &'static str, build: F) -> Arc<[TestCase]>
    where
        F: FnOnce() -> Vec<TestCase>,
    {
        if let Some(cached) = self.get(key) {
            return cached;
        }
        let value: Arc<[TestCase]> = build().into();
        self.set(key, Arc::clone(&value));
        value
    }

    pub fn len(&self) -> usize {
        self.data.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(value: f64) -> Vec<TestCase> {
        vec![TestCase { input: value, expected: value }]
    }

    #[test]
    fn test_builds_once() {
        let cache = CaseCache::new(4);
        let first = cache.get_or_insert_with("poly2", || sample(1.0));
        let second = cache.get_or_insert_with("poly2", || sample(2.0));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second[0].input, 1.0);
    }

    #[test]
    fn test_clears_when_full() {
        let cache = CaseCache::new(1);
        cache.set("a", sample(1.0).into());
        cache.set("b", sample(2.0).into());
        assert_eq!(cache.len(), 1);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
    }
}
