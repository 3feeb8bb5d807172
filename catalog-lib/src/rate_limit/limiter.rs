//! Minimum-interval rate limiter.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Spaces out dispatches so that no two start closer than `min_interval`.
///
/// Calls arriving faster than the interval are delayed, never dropped or
/// merged. Each caller reserves the next free slot under the lock and then
/// sleeps until that slot outside of it, so dispatch order follows the
/// order in which callers reached the lock.
///
/// One limiter is meant to be shared by every request kind: search,
/// details and suggest all draw from the same budget. This is cheap to
/// clone; clones share state.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use catalog_lib::rate_limit::RateLimiter;
///
/// // Default: one dispatch every 200ms
/// let limiter = RateLimiter::default();
///
/// // Custom: one dispatch per second
/// let custom = RateLimiter::new(Duration::from_secs(1));
/// assert_eq!(custom.min_interval(), Duration::from_secs(1));
/// ```
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<RateLimiterInner>,
}

struct RateLimiterInner {
    state: Mutex<RateLimiterState>,
    min_interval: Duration,
}

struct RateLimiterState {
    /// Start of the most recently reserved dispatch slot.
    last_dispatch: Option<Instant>,
}

impl RateLimiter {
    /// Creates a new rate limiter with the given minimum spacing.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            inner: Arc::new(RateLimiterInner {
                state: Mutex::new(RateLimiterState {
                    last_dispatch: None,
                }),
                min_interval,
            }),
        }
    }

    /// Waits until the caller may dispatch.
    ///
    /// Returns the instant at which the dispatch slot started.
    pub async fn acquire(&self) -> Instant {
        let slot = {
            let mut state = self.inner.state.lock().await;
            let now = Instant::now();

            let slot = match state.last_dispatch {
                Some(last) => (last + self.inner.min_interval).max(now),
                None => now,
            };
            state.last_dispatch = Some(slot);
            slot
        };

        // Wait outside the lock
        let now = Instant::now();
        if slot > now {
            log::debug!("rate limiter delaying dispatch by {:?}", slot - now);
            tokio::time::sleep_until(slot).await;
        }
        slot
    }

    /// Runs `operation` once its dispatch slot arrives.
    ///
    /// Only the start of `operation` is spaced; its completion is not
    /// waited on before the next slot is handed out. Whatever `operation`
    /// returns, including errors, is passed through unchanged.
    pub async fn schedule<F, Fut, T>(&self, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.acquire().await;
        operation().await
    }

    /// Returns the configured minimum interval.
    pub fn min_interval(&self) -> Duration {
        self.inner.min_interval
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_dispatch_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_calls_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        let mut stamps = Vec::new();
        for _ in 0..5 {
            stamps.push(limiter.schedule(|| async { Instant::now() }).await);
        }

        assert_eq!(stamps.len(), 5);
        for pair in stamps.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(200));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_calls_are_spaced_and_none_dropped() {
        let limiter = RateLimiter::new(Duration::from_millis(100));
        let stamps = Arc::new(StdMutex::new(Vec::new()));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                let stamps = stamps.clone();
                tokio::spawn(async move {
                    limiter
                        .schedule(|| async {
                            stamps.lock().unwrap().push(Instant::now());
                        })
                        .await;
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let mut stamps = stamps.lock().unwrap().clone();
        stamps.sort();
        assert_eq!(stamps.len(), 8);
        for pair in stamps.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(100));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_gap_resets_delay() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        limiter.acquire().await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_pass_through() {
        let limiter = RateLimiter::default();
        let result: Result<(), &str> = limiter.schedule(|| async { Err("boom") }).await;
        assert_eq!(result, Err("boom"));
    }
}
