//! Clocks and owner-scoped periodic timers.
//!
//! Every periodic task in the monitor (header clock, dashboard feed, live
//! tracking) runs inside a [`ScopedTimer`]. The timer is cancelled when its
//! owner stops it or drops it, so no tick can touch state after the owning
//! board is gone.

use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = lock(&self.now);
        *now = *now + by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *lock(&self.now) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *lock(&self.now)
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shortest period a timer will run at.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A periodic task bound to the lifetime of its owner.
pub struct ScopedTimer {
    name: &'static str,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ScopedTimer {
    /// Spawns `on_tick` every `period`. The first tick fires one full period
    /// after the call. Periods below [`MIN_PERIOD`] are raised to it.
    pub fn spawn<F>(name: &'static str, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let period = if period < MIN_PERIOD {
            warn!(timer = name, ?period, "Timer period too short, using {:?}", MIN_PERIOD);
            MIN_PERIOD
        } else {
            period
        };
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            debug!(timer = name, ?period, "Timer started");

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => on_tick(),
                }
            }

            debug!(timer = name, "Timer stopped");
        });

        Self {
            name,
            cancel,
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
            && self.handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    /// Cancels the timer and waits for its task to wind down.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        clock.advance(chrono::Duration::seconds(3));
        assert_eq!(clock.now(), start + chrono::Duration::seconds(3));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let timer = ScopedTimer::spawn("test", Duration::from_secs(3), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(2_900)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(9_200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 4);

        timer.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_timer_cancels_it() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let timer = ScopedTimer::spawn("test", Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(2_500)).await;
        drop(timer);
        let seen = count.load(Ordering::SeqCst);
        assert_eq!(seen, 2);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_still_ticks() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let timer = ScopedTimer::spawn("test", Duration::ZERO, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(10)).await;
        assert!(timer.is_running());
        assert!(count.load(Ordering::SeqCst) >= 1);

        timer.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_reports_not_running() {
        let timer = ScopedTimer::spawn("test", Duration::from_secs(1), || {});
        assert!(timer.is_running());
        assert_eq!(timer.name(), "test");
        timer.stop().await;
    }
}
