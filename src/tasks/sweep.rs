//! Expiry Sweep Task
//!
//! Optional background task that periodically drops expired cache entries.
//! Without it, expired entries only leave the store when something reads
//! or invalidates them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, TtlCache};

/// Spawns a background task that calls [`TtlCache::purge_expired`] every `interval`.
///
/// The returned handle is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(TtlCache::<String>::new()));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(30));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<T, C>(
    cache: Arc<RwLock<TtlCache<T, C>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting cache expiry sweep");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.purge_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::time::Instant;

    const SWEEP_EVERY: Duration = Duration::from_millis(20);
    const DEADLINE: Duration = Duration::from_secs(5);

    fn shared_cache() -> (Arc<RwLock<TtlCache<String, ManualClock>>>, ManualClock) {
        let clock = ManualClock::new(0);
        let cache = TtlCache::with_clock(clock.clone());
        (Arc::new(RwLock::new(cache)), clock)
    }

    /// Polls until the cache holds `expected` entries or the deadline passes.
    async fn wait_for_len(
        cache: &RwLock<TtlCache<String, ManualClock>>,
        expected: usize,
    ) -> bool {
        let started = Instant::now();
        while started.elapsed() < DEADLINE {
            if cache.read().await.len() == expected {
                return true;
            }
            tokio::time::sleep(SWEEP_EVERY).await;
        }
        false
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let (cache, clock) = shared_cache();
        cache
            .write()
            .await
            .set("expire_soon", "value".to_string(), Duration::from_secs(1));
        clock.advance(Duration::from_secs(2));

        let handle = spawn_sweep_task(cache.clone(), SWEEP_EVERY);

        // Removed without any read touching it
        assert!(wait_for_len(&cache, 0).await, "sweep never removed the entry");
        assert_eq!(cache.read().await.stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_preserves_live_entries() {
        let (cache, clock) = shared_cache();
        {
            let mut guard = cache.write().await;
            guard.set("long_lived", "value".to_string(), Duration::from_secs(3600));
            guard.set("marker", "gone".to_string(), Duration::from_secs(1));
        }
        clock.advance(Duration::from_secs(2));

        let handle = spawn_sweep_task(cache.clone(), SWEEP_EVERY);

        // The expired marker disappearing proves at least one sweep ran
        assert!(wait_for_len(&cache, 1).await, "sweep never ran");
        assert_eq!(
            cache.write().await.get("long_lived").as_deref(),
            Some("value")
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_can_be_aborted() {
        let (cache, _clock) = shared_cache();

        let handle = spawn_sweep_task(cache, Duration::from_secs(1));
        handle.abort();

        let started = Instant::now();
        while !handle.is_finished() && started.elapsed() < DEADLINE {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
