// In-memory notification caches.
// Remembers which notifications were shown and which were read locally.

use std::collections::HashMap;
use std::sync::Mutex;

// These maps only grow. An older unread notice might still be visible and
// needs to stay clickable, so entries are not dropped between checks.

/// Notification id -> browser URL for every desktop notification shown.
#[derive(Debug, Default)]
pub struct ShownNotificationCache {
    urls: Mutex<HashMap<String, String>>,
}

impl ShownNotificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    pub fn url(&self, id: &str) -> Option<String> {
        self.lock().get(id).cloned()
    }

    pub fn insert(&self, id: impl Into<String>, url: impl Into<String>) {
        self.lock().insert(id.into(), url.into());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // Writes are single assignments, so a poisoned map is still consistent.
        self.urls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Notification id -> read flag for threads marked read from this process.
/// Trusted over the server's unread flag, which lags behind.
#[derive(Debug, Default)]
pub struct LocalReadCache {
    read: Mutex<HashMap<String, bool>>,
}

impl LocalReadCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_read(&self, id: &str) -> bool {
        self.lock().get(id).copied().unwrap_or(false)
    }

    pub fn mark_read(&self, id: impl Into<String>) {
        self.lock().insert(id.into(), true);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, bool>> {
        self.read.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shown_cache() {
        let cache = ShownNotificationCache::new();
        assert!(cache.is_empty());
        assert!(!cache.contains("1"));

        cache.insert("1", "https://github.com/org/repo/issues/1");
        assert!(cache.contains("1"));
        assert_eq!(
            cache.url("1").as_deref(),
            Some("https://github.com/org/repo/issues/1")
        );
        assert_eq!(cache.url("2"), None);

        // Last writer wins
        cache.insert("1", "https://github.com/org/repo/issues/2");
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.url("1").as_deref(),
            Some("https://github.com/org/repo/issues/2")
        );
    }

    #[test]
    fn test_local_read_cache() {
        let cache = LocalReadCache::new();
        assert!(!cache.is_read("1"));

        cache.mark_read("1");
        assert!(cache.is_read("1"));
        assert!(!cache.is_read("2"));
        assert_eq!(cache.len(), 1);
    }
}
