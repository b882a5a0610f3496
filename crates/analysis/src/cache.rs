//! Fingerprint-keyed memoization of diagnostic computation.
//!
//! The engine runs on every keystroke-driven request while validation is
//! comparatively expensive, so identical inputs under an unchanged schema
//! revision must not recompute. The cache is owned by the engine (handed
//! in at construction), with an injectable clock and capacity/TTL bounds
//! so tests are deterministic. Keys are a fast non-cryptographic hash;
//! collisions are an accepted trade-off of the scheme.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::{Duration, Instant};
use template_types::SourceDiagnostic;

/// Default maximum number of cached entries.
pub const DEFAULT_CAPACITY: usize = 5000;
/// Default time-to-live per entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Time source for TTL checks, injectable for tests.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    diagnostics: Arc<Vec<SourceDiagnostic>>,
    inserted_at: Instant,
    last_used: u64,
}

/// Bounded, TTL-expiring map from content fingerprint to diagnostics.
///
/// Eviction: least-recently-used once `capacity` is reached, plus a fixed
/// TTL per entry; whichever triggers first removes the entry.
pub struct FingerprintCache {
    entries: HashMap<u64, CacheEntry>,
    capacity: usize,
    ttl: Duration,
    clock: Box<dyn Clock + Send>,
    tick: u64,
}

impl Default for FingerprintCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

impl FingerprintCache {
    /// Create a cache with the system clock.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::with_clock(capacity, ttl, Box::new(SystemClock))
    }

    /// Create a cache with an injected clock.
    #[must_use]
    pub fn with_clock(capacity: usize, ttl: Duration, clock: Box<dyn Clock + Send>) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            ttl,
            clock,
            tick: 0,
        }
    }

    /// Look up cached diagnostics, refreshing recency on a hit. Expired
    /// entries are removed and reported as absent.
    pub fn get(&mut self, key: u64) -> Option<Arc<Vec<SourceDiagnostic>>> {
        let now = self.clock.now();
        let expired = self
            .entries
            .get(&key)
            .map(|entry| now.duration_since(entry.inserted_at) >= self.ttl)?;

        if expired {
            self.entries.remove(&key);
            tracing::debug!(key, "cache entry expired");
            return None;
        }

        self.tick += 1;
        let entry = self.entries.get_mut(&key)?;
        entry.last_used = self.tick;
        Some(Arc::clone(&entry.diagnostics))
    }

    /// Insert diagnostics, evicting the least-recently-used entry if the
    /// cache is at capacity.
    pub fn put(&mut self, key: u64, diagnostics: Arc<Vec<SourceDiagnostic>>) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            if let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| *key)
            {
                self.entries.remove(&oldest);
                tracing::debug!(key = oldest, "evicted least-recently-used cache entry");
            }
        }

        self.tick += 1;
        self.entries.insert(
            key,
            CacheEntry {
                diagnostics,
                inserted_at: self.clock.now(),
                last_used: self.tick,
            },
        );
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute the fingerprint for one request: the per-site combined texts
/// joined by a separator, the serialized external fragment texts
/// (call-style only), and the schema revision.
#[must_use]
pub fn fingerprint<'a>(
    combined_texts: impl Iterator<Item = &'a str>,
    fragment_texts: impl Iterator<Item = &'a str>,
    schema_version: u64,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    for text in combined_texts {
        text.hash(&mut hasher);
        "-".hash(&mut hasher);
    }
    for text in fragment_texts {
        text.hash(&mut hasher);
        "-".hash(&mut hasher);
    }
    schema_version.hash(&mut hasher);
    hasher.finish()
}
