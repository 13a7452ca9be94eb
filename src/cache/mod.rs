//! Per-property insight memoization with lazy time-based invalidation.
//!
//! Entries are never swept: an expired entry stays in place until a
//! successful regeneration overwrites it, so a model outage degrades to
//! stale data instead of no data.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::models::CachedInsight;

/// Freshness window: 24 hours from generation.
pub const INSIGHT_TTL_SECS: i64 = 86_400;

/// Map-level synchronized insight store. Writes replace whole entries, so
/// concurrent misses for the same key race harmlessly (last writer wins).
pub struct InsightCache {
    entries: RwLock<HashMap<String, CachedInsight>>,
    ttl: Duration,
}

impl Default for InsightCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(INSIGHT_TTL_SECS),
        }
    }

    fn key(property_id: &str) -> String {
        format!("insight_{}", property_id)
    }

    /// Content for `property_id` if a cached entry exists and is younger
    /// than the TTL as of `now`. Expired entries report a miss but are left
    /// in place.
    pub fn fresh_content(&self, property_id: &str, now: DateTime<Utc>) -> Option<String> {
        let entries = self.entries.read();
        let entry = entries.get(&Self::key(property_id))?;
        if now - entry.generated_at < self.ttl {
            debug!(property_id, "Insight cache hit");
            Some(entry.content.clone())
        } else {
            debug!(property_id, "Insight cache entry expired");
            None
        }
    }

    /// The raw entry regardless of age, for callers that can use stale data.
    pub fn peek(&self, property_id: &str) -> Option<CachedInsight> {
        self.entries.read().get(&Self::key(property_id)).cloned()
    }

    /// Record a successful generation, replacing any prior entry.
    pub fn store(&self, property_id: &str, content: String, generated_at: DateTime<Utc>) {
        let mut entries = self.entries.write();
        entries.insert(
            Self::key(property_id),
            CachedInsight {
                content,
                generated_at,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
