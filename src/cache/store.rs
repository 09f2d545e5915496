// In-memory cache store.
// Slot-name keyed values sharing a single staleness stamp, with an injected clock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

/// Default TTL for cached GitHub data: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Time source, injected so tests can advance the clock manually.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used in production.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// In-memory cache with one staleness stamp shared by every slot.
///
/// There is deliberately no per-key expiry: any successful refresh stamps the
/// clock for the whole cache, and a stale stamp invalidates every slot at
/// once. Values are stored as JSON so slots of different types can share the
/// same map.
pub struct MemoryCache {
    slots: HashMap<String, serde_json::Value>,
    fetched_at: Option<DateTime<Utc>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: HashMap::new(),
            fetched_at: None,
            ttl,
            clock,
        }
    }

    /// Whether the shared stamp is within the TTL.
    pub fn is_fresh(&self) -> bool {
        let Some(fetched_at) = self.fetched_at else {
            return false;
        };

        let elapsed = self
            .clock
            .now()
            .signed_duration_since(fetched_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        elapsed <= self.ttl
    }

    /// Read a slot, returning `None` when the slot is absent or the cache is stale.
    pub fn get<T: DeserializeOwned>(&self, slot: &str) -> Option<T> {
        if !self.is_fresh() {
            return None;
        }

        let value = self.slots.get(slot)?;
        match serde_json::from_value(value.clone()) {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::warn!(slot, %err, "cached value failed to deserialize, refetching");
                None
            }
        }
    }

    /// Store a value and stamp the shared clock.
    pub fn put<T: Serialize>(&mut self, slot: &str, value: &T) -> Result<()> {
        let json = serde_json::to_value(value)?;
        self.slots.insert(slot.to_string(), json);
        self.fetched_at = Some(self.clock.now());
        Ok(())
    }

    /// Drop every slot and reset the staleness stamp unconditionally.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.fetched_at = None;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::{DateTime, Utc};

    use super::Clock;

    /// Manually advanced clock for TTL tests.
    pub struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Mutex::new(Utc::now()),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += chrono::Duration::from_std(by).unwrap();
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::{Deserialize, Serialize};

    use super::testing::ManualClock;
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_put_and_get() {
        let mut cache = MemoryCache::new(DEFAULT_TTL, Arc::new(SystemClock));
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        cache.put("slot", &data).unwrap();
        assert_eq!(cache.get::<TestData>("slot"), Some(data));
        assert_eq!(cache.get::<TestData>("other"), None);
    }

    #[test]
    fn test_stale_stamp_invalidates_every_slot() {
        let clock = Arc::new(ManualClock::new());
        let mut cache = MemoryCache::new(Duration::from_secs(60), clock.clone());

        cache.put("a", &1u32).unwrap();
        cache.put("b", &2u32).unwrap();
        assert!(cache.is_fresh());

        clock.advance(Duration::from_secs(61));
        assert!(!cache.is_fresh());
        assert_eq!(cache.get::<u32>("a"), None);
        assert_eq!(cache.get::<u32>("b"), None);
    }

    #[test]
    fn test_refresh_restamps_shared_clock() {
        let clock = Arc::new(ManualClock::new());
        let mut cache = MemoryCache::new(Duration::from_secs(60), clock.clone());

        cache.put("a", &1u32).unwrap();
        clock.advance(Duration::from_secs(45));

        // Refreshing any slot renews the stamp for all of them.
        cache.put("b", &2u32).unwrap();
        clock.advance(Duration::from_secs(45));
        assert_eq!(cache.get::<u32>("a"), Some(1));
    }

    #[test]
    fn test_clear_resets_stamp() {
        let mut cache = MemoryCache::new(DEFAULT_TTL, Arc::new(SystemClock));
        cache.put("slot", &7u32).unwrap();

        cache.clear();
        assert!(!cache.is_fresh());
        assert_eq!(cache.get::<u32>("slot"), None);
    }
}
