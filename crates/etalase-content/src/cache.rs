//! In-memory cache of parsed content directories.
//!
//! Entries are keyed by content type and hold a fully parsed document list.
//! An entry is served only while it is younger than the TTL *and* the
//! directory's [`Fingerprint`] is unchanged, so edits on disk are picked up
//! on the next read even within the TTL.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use etalase_core::util::files::FileInfo;
use tokio::sync::RwLock;

use crate::document::ContentDocument;

/// Snapshot of a directory listing: names, sizes, and modification times.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fingerprint(Vec<(String, u64, Option<SystemTime>)>);

impl Fingerprint {
    /// Fingerprint a file listing.
    pub fn of(files: &[FileInfo]) -> Self {
        Self(
            files
                .iter()
                .map(|f| (f.file_name.clone(), f.len, f.modified))
                .collect(),
        )
    }
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: Fingerprint,
    loaded_at: Instant,
    documents: Arc<Vec<ContentDocument>>,
}

/// TTL-bounded, fingerprint-validated document cache.
#[derive(Debug)]
pub struct DocumentCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl DocumentCache {
    /// Create a cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached documents for `key`, if fresh and still matching `fingerprint`.
    pub async fn get(&self, key: &str, fingerprint: &Fingerprint) -> Option<Arc<Vec<ContentDocument>>> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.loaded_at.elapsed() > self.ttl {
            log::debug!("cache entry for '{key}' expired");
            return None;
        }
        if &entry.fingerprint != fingerprint {
            log::debug!("cache entry for '{key}' is stale; directory changed");
            return None;
        }
        Some(Arc::clone(&entry.documents))
    }

    /// Store a fully parsed document list, dropping expired entries.
    pub async fn insert(&self, key: &str, fingerprint: Fingerprint, documents: Vec<ContentDocument>) {
        let entry = CacheEntry {
            fingerprint,
            loaded_at: Instant::now(),
            documents: Arc::new(documents),
        };
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.loaded_at.elapsed() <= self.ttl);
        if entries.len() < before {
            log::debug!("pruned {} expired cache entries", before - entries.len());
        }
        entries.insert(key.to_string(), entry);
    }

    /// Drop the entry for `key`.
    pub async fn invalidate(&self, key: &str) {
        if self.entries.write().await.remove(key).is_some() {
            log::debug!("invalidated cache entry for '{key}'");
        }
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
