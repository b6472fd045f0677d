//! In-process TTL cache for fetched weeks.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Key/value store whose entries expire `ttl` after insertion.
///
/// Expired entries are evicted lazily by the `get` that observes them; there
/// is no background sweeper and no capacity bound, which is fine for the
/// handful of week keys this service ever holds. The struct itself is not
/// synchronized; [`MenuFetcher`](crate::fetch::MenuFetcher) wraps it in a
/// lock.
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: HashMap<String, (Instant, V)>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: HashMap::new() }
    }

    /// Returns the value stored under `key` if it has not outlived the TTL.
    /// A stale entry is removed and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let live = match self.entries.get(key) {
            None => return None,
            Some((inserted_at, value)) if inserted_at.elapsed() <= self.ttl => Some(value.clone()),
            Some(_) => None,
        };
        if live.is_none() {
            self.entries.remove(key);
        }
        live
    }

    /// Inserts or overwrites `key`, resetting its insertion time.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), (Instant::now(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
