use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use stocksight_common::TrackingEventType;

use crate::error::{MonitorError, Result};

/// Process-local counters for the simulated feeds.
pub struct Metrics {
    registry: Registry,
    tracking_events: IntCounterVec,
    tracker_ticks: IntCounter,
    buffered_events: IntGauge,
    dashboard_snapshots: IntCounter,
    clock_ticks: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new_custom(Some("stocksight".to_string()), None)?;

        let tracking_events = IntCounterVec::new(
            Opts::new("tracking_events_total", "Tracking events generated, by type"),
            &["type"],
        )?;
        let tracker_ticks = IntCounter::new("tracker_ticks_total", "Live tracking timer ticks")?;
        let buffered_events = IntGauge::new("tracking_buffered_events", "Events held in the live tracking list")?;
        let dashboard_snapshots =
            IntCounter::new("dashboard_snapshots_total", "Mock dashboard feed snapshots produced")?;
        let clock_ticks = IntCounter::new("header_clock_ticks_total", "Header clock ticks")?;

        registry.register(Box::new(tracking_events.clone()))?;
        registry.register(Box::new(tracker_ticks.clone()))?;
        registry.register(Box::new(buffered_events.clone()))?;
        registry.register(Box::new(dashboard_snapshots.clone()))?;
        registry.register(Box::new(clock_ticks.clone()))?;

        Ok(Self {
            registry,
            tracking_events,
            tracker_ticks,
            buffered_events,
            dashboard_snapshots,
            clock_ticks,
        })
    }

    pub fn record_tracker_tick(&self, buffered: usize) {
        self.tracker_ticks.inc();
        self.buffered_events.set(buffered as i64);
    }

    pub fn record_tracking_event(&self, event_type: TrackingEventType) {
        let label = match event_type {
            TrackingEventType::Entry => "entry",
            TrackingEventType::Exit => "exit",
        };
        self.tracking_events.with_label_values(&[label]).inc();
    }

    pub fn record_dashboard_snapshot(&self) {
        self.dashboard_snapshots.inc();
    }

    pub fn record_clock_tick(&self) {
        self.clock_ticks.inc();
    }

    pub fn tracking_events(&self, event_type: TrackingEventType) -> u64 {
        let label = match event_type {
            TrackingEventType::Entry => "entry",
            TrackingEventType::Exit => "exit",
        };
        self.tracking_events.with_label_values(&[label]).get()
    }

    /// Prometheus text exposition of every registered metric.
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| MonitorError::MetricsError(e.to_string()))
    }
}
