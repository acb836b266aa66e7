//! Expiry Sweep Task
//!
//! Background task that periodically purges expired cache entries,
//! independent of read/write traffic.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::EntryStore;

// == Sweep Task ==
/// Periodic reclamation sweep with an explicit start/stop lifecycle.
///
/// Created at boot alongside the cache service, started before traffic is
/// accepted and stopped during shutdown. Tests can call [`SweepTask::run_once`]
/// directly instead of racing the timer. An individual sweep iteration
/// cannot take the task down; the loop always continues on the next
/// interval.
pub struct SweepTask {
    /// Shared handle to the entry store
    store: Arc<RwLock<EntryStore>>,
    /// Interval between sweep iterations
    interval: Duration,
    /// Handle of the running loop, if started
    handle: Option<JoinHandle<()>>,
}

impl SweepTask {
    // == Constructor ==
    /// Creates a sweep task over the given store, not yet running.
    pub fn new(store: Arc<RwLock<EntryStore>>, interval_secs: u64) -> Self {
        Self {
            store,
            interval: Duration::from_secs(interval_secs),
            handle: None,
        }
    }

    // == Start ==
    /// Spawns the sweep loop. Starting an already-running task is a no-op.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let store = Arc::clone(&self.store);
        let interval = self.interval;

        self.handle = Some(tokio::spawn(async move {
            info!("Expiry sweep started, interval {:?}", interval);
            loop {
                tokio::time::sleep(interval).await;
                let removed = Self::run_once(&store).await;
                if removed > 0 {
                    info!("Expiry sweep removed {} entries", removed);
                } else {
                    debug!("Expiry sweep found no expired entries");
                }
            }
        }));
    }

    // == Stop ==
    /// Aborts the sweep loop. Stopping a task that was never started is a
    /// no-op.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("Expiry sweep stopped");
        }
    }

    // == Run Once ==
    /// A single sweep iteration: write-lock the store and purge expired
    /// entries. Returns the number removed.
    pub async fn run_once(store: &RwLock<EntryStore>) -> usize {
        store.write().await.cleanup_expired()
    }

    // == Is Running ==
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SweepTask {
    fn drop(&mut self) {
        self.stop();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn shared_store() -> Arc<RwLock<EntryStore>> {
        Arc::new(RwLock::new(EntryStore::new(100, 300)))
    }

    #[tokio::test]
    async fn test_run_once_removes_expired_entries() {
        let store = shared_store();

        {
            let mut guard = store.write().await;
            guard.set("expire_soon".to_string(), json!("v"), Some(1)).unwrap();
            guard.set("long_lived".to_string(), json!("v"), Some(3600)).unwrap();
        }

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let removed = SweepTask::run_once(&store).await;
        assert_eq!(removed, 1);

        let mut guard = store.write().await;
        assert!(guard.get("expire_soon").is_none());
        assert!(guard.get("long_lived").is_some());
    }

    #[tokio::test]
    async fn test_sweep_loop_removes_expired_entries() {
        let store = shared_store();

        {
            let mut guard = store.write().await;
            guard.set("expire_soon".to_string(), json!("v"), Some(1)).unwrap();
        }

        let mut sweep = SweepTask::new(Arc::clone(&store), 1);
        sweep.start();
        assert!(sweep.is_running());

        tokio::time::sleep(Duration::from_millis(2500)).await;

        {
            let guard = store.read().await;
            assert!(guard.is_expired("expire_soon"));
            assert_eq!(guard.len(), 0, "Expired entry should have been swept");
        }

        sweep.stop();
        assert!(!sweep.is_running());
    }

    #[tokio::test]
    async fn test_start_twice_is_noop() {
        let mut sweep = SweepTask::new(shared_store(), 60);

        sweep.start();
        sweep.start();
        assert!(sweep.is_running());

        sweep.stop();
    }

    #[tokio::test]
    async fn test_stop_without_start_is_noop() {
        let mut sweep = SweepTask::new(shared_store(), 60);
        sweep.stop();
        assert!(!sweep.is_running());
    }
}
