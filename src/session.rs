use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

/// Cookie that ties a browser to its stored analysis.
pub const SESSION_COOKIE: &str = "sid";

struct Entry {
    data: Value,
    stored_at: Instant,
}

/// Per-visitor storage for the most recent backend response. Entries live
/// in memory only and disappear on restart, expiry, or "back to upload".
pub struct SessionStore {
    entries: DashMap<String, Entry>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn new_token() -> String {
        Uuid::new_v4().to_string()
    }

    /// Stores the backend response exactly as received, replacing whatever
    /// the session held before.
    pub fn put(&self, token: &str, data: Value) {
        self.purge_expired();
        self.entries.insert(
            token.to_string(),
            Entry {
                data,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn get(&self, token: &str) -> Option<Value> {
        let entry = self.entries.get(token)?;
        if entry.stored_at.elapsed() > self.ttl {
            drop(entry);
            self.entries.remove(token);
            return None;
        }
        Some(entry.data.clone())
    }

    pub fn remove(&self, token: &str) {
        self.entries.remove(token);
    }

    fn purge_expired(&self) {
        self.entries
            .retain(|_, entry| entry.stored_at.elapsed() <= self.ttl);
    }
}
