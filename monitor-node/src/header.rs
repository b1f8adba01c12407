use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::metrics::Metrics;
use crate::timers::{lock, Clock, ScopedTimer};

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct HeaderState {
    pub now: DateTime<Utc>,
    pub display_time: String,
    pub alert_count: usize,
    /// Bell badge; hidden when there is nothing unread.
    pub badge: Option<usize>,
}

struct HeaderShared {
    clock: Arc<dyn Clock>,
    now: Mutex<DateTime<Utc>>,
    alert_count: AtomicUsize,
    metrics: Option<Arc<Metrics>>,
}

/// The top bar clock and alert bell.
pub struct HeaderClock {
    shared: Arc<HeaderShared>,
    timer: Option<ScopedTimer>,
}

impl HeaderClock {
    pub fn mount(
        period: Duration,
        clock: Arc<dyn Clock>,
        alert_count: usize,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        let shared = Arc::new(HeaderShared {
            now: Mutex::new(clock.now()),
            clock,
            alert_count: AtomicUsize::new(alert_count),
            metrics,
        });

        let ticker = shared.clone();
        let timer = ScopedTimer::spawn("header-clock", period, move || {
            *lock(&ticker.now) = ticker.clock.now();
            if let Some(metrics) = &ticker.metrics {
                metrics.record_clock_tick();
            }
        });

        Self {
            shared,
            timer: Some(timer),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        *lock(&self.shared.now)
    }

    pub fn alert_count(&self) -> usize {
        self.shared.alert_count.load(Ordering::SeqCst)
    }

    pub fn set_alert_count(&self, count: usize) {
        self.shared.alert_count.store(count, Ordering::SeqCst);
    }

    pub fn state(&self) -> HeaderState {
        let now = self.now();
        let alert_count = self.alert_count();
        HeaderState {
            now,
            display_time: now.with_timezone(&Local).format("%H:%M:%S").to_string(),
            alert_count,
            badge: (alert_count > 0).then_some(alert_count),
        }
    }

    pub async fn unmount(mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop().await;
        }
    }
}
