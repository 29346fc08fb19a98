use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

/// A string value together with its optional absolute expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct StringEntry {
    pub value: String,
    pub expires_at: Option<Instant>,
}

impl StringEntry {
    pub fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(expires_at) if now > expires_at)
    }
}

/// Key to string mapping with lazy expiration.
///
/// Expired entries are only removed when a read notices them; there is no
/// background sweeper.
#[derive(Debug, Default)]
pub struct StringStore {
    entries: DashMap<String, StringEntry>,
}

impl StringStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous entry. A `ttl` of
    /// `None` never expires.
    pub fn set(&self, key: String, value: String, ttl: Option<Duration>) {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);

        self.entries.insert(key, StringEntry { value, expires_at });
    }

    /// Returns the live value under `key`, deleting it first if it has expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();

        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some()
        {
            return None;
        }

        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Reports whether `key` holds a value that has not expired, deleting an
    /// expired one.
    pub fn contains_live_key(&self, key: &str) -> bool {
        let now = Instant::now();

        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        self.entries.contains_key(key)
    }

    /// Reports whether an entry exists, without applying expiry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
