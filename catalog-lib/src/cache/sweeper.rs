//! Periodic removal of expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::CacheProvider;

/// Handle to a background task that sweeps a cache on a fixed cadence.
///
/// The sweep runs independently of read/write traffic, so memory stays
/// bounded under churn even when nobody reads the expired keys again.
/// Dropping the handle stops the task; [`Sweeper::shutdown`] stops it and
/// waits for it to finish.
///
/// Must be created from within a tokio runtime.
pub struct Sweeper {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Spawns the sweep task. The first sweep happens one `interval` from now.
    pub fn spawn(cache: Arc<dyn CacheProvider>, interval: Duration) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        // tokio intervals cannot be zero.
        let interval = interval.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        let removed = cache.sweep(Utc::now()).await;
                        if removed > 0 {
                            log::debug!("cache sweep removed {} expired entries", removed);
                        }
                    }
                }
            }
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    /// Returns `true` while the sweep task is still scheduled.
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
            && self
                .handle
                .as_ref()
                .is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the sweep task and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
