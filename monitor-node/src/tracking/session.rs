use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stocksight_common::{TrackingEvent, TrackingStats};
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::source::TrackingSource;
use super::tracker::{LiveTracker, TrackingMode};
use crate::metrics::Metrics;
use crate::timers::{lock, Clock, ScopedTimer};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Point-in-time copy of the live tracking board.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TrackingSnapshot {
    pub mode: TrackingMode,
    pub events: Vec<TrackingEvent>,
    pub stats: TrackingStats,
    pub last_update: Option<String>,
}

struct Shared {
    tracker: Mutex<LiveTracker>,
    source: Mutex<Box<dyn TrackingSource>>,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<TrackingEvent>,
    metrics: Option<Arc<Metrics>>,
}

impl Shared {
    fn tick(&self) -> Option<TrackingEvent> {
        let now = self.clock.now();
        let mut tracker = lock(&self.tracker);
        let mut source = lock(&self.source);

        let event = tracker.tick(&mut **source, now).cloned();

        if let Some(metrics) = &self.metrics {
            metrics.record_tracker_tick(tracker.len());
            if let Some(event) = &event {
                metrics.record_tracking_event(event.event_type);
            }
        }

        if let Some(event) = &event {
            debug!(
                event_id = %event.id,
                event_type = ?event.event_type,
                item = %event.item,
                "Tracking event recorded"
            );
            // No subscribers is fine.
            let _ = self.events.send(event.clone());
        }
        event
    }
}

/// A mounted live tracking board. The generator timer runs only while the
/// board is in tracking mode and never outlives the session.
pub struct TrackingSession {
    shared: Arc<Shared>,
    period: Duration,
    timer: Option<ScopedTimer>,
}

impl TrackingSession {
    /// Mounts the board and starts the generator if the tracker is in
    /// tracking mode. Must be called inside a tokio runtime.
    pub fn mount(
        tracker: LiveTracker,
        source: Box<dyn TrackingSource>,
        period: Duration,
        clock: Arc<dyn Clock>,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let tracking = tracker.is_tracking();

        let mut session = Self {
            shared: Arc::new(Shared {
                tracker: Mutex::new(tracker),
                source: Mutex::new(source),
                clock,
                events,
                metrics,
            }),
            period,
            timer: None,
        };
        if tracking {
            session.spawn_timer();
        }
        info!(?period, tracking, "Live tracking mounted");
        session
    }

    pub fn mode(&self) -> TrackingMode {
        lock(&self.shared.tracker).mode()
    }

    pub fn is_generating(&self) -> bool {
        self.timer.as_ref().map(ScopedTimer::is_running).unwrap_or(false)
    }

    pub fn toggle(&mut self) -> TrackingMode {
        match self.mode() {
            TrackingMode::Tracking => self.pause(),
            TrackingMode::Paused => self.resume(),
        }
        self.mode()
    }

    pub fn resume(&mut self) {
        lock(&self.shared.tracker).set_mode(TrackingMode::Tracking);
        if self.timer.is_none() {
            self.spawn_timer();
        }
        info!("Live tracking resumed");
    }

    /// Halts generation. Events and counters stay as they are.
    pub fn pause(&mut self) {
        lock(&self.shared.tracker).set_mode(TrackingMode::Paused);
        self.timer = None;
        info!("Live tracking paused");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrackingEvent> {
        self.shared.events.subscribe()
    }

    pub fn snapshot(&self) -> TrackingSnapshot {
        let now = self.shared.clock.now();
        let tracker = lock(&self.shared.tracker);
        TrackingSnapshot {
            mode: tracker.mode(),
            events: tracker.events().cloned().collect(),
            stats: tracker.stats(),
            last_update: tracker.last_update(now),
        }
    }

    /// Runs one generator tick immediately, outside the timer.
    pub fn tick_now(&self) -> Option<TrackingEvent> {
        self.shared.tick()
    }

    /// Stops the generator, waits for it to finish and returns the final board.
    pub async fn unmount(mut self) -> TrackingSnapshot {
        if let Some(timer) = self.timer.take() {
            timer.stop().await;
        }
        let snapshot = self.snapshot();
        info!(total_today = snapshot.stats.total_today, "Live tracking unmounted");
        snapshot
    }

    fn spawn_timer(&mut self) {
        let shared = self.shared.clone();
        self.timer = Some(ScopedTimer::spawn("live-tracking", self.period, move || {
            shared.tick();
        }));
    }
}
