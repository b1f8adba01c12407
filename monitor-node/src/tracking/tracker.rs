use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use stocksight_common::utils::format_relative;
use stocksight_common::{TrackingEvent, TrackingStats};

use super::source::TrackingSource;
use crate::seed;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    #[default]
    Tracking,
    Paused,
}

impl TrackingMode {
    pub fn toggled(self) -> Self {
        match self {
            TrackingMode::Tracking => TrackingMode::Paused,
            TrackingMode::Paused => TrackingMode::Tracking,
        }
    }
}

/// The live tracking board: a bounded newest-first event list plus running
/// counters.
#[derive(Debug, Clone)]
pub struct LiveTracker {
    events: VecDeque<TrackingEvent>,
    stats: TrackingStats,
    capacity: usize,
    mode: TrackingMode,
}

impl LiveTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            stats: TrackingStats::default(),
            capacity,
            mode: TrackingMode::Tracking,
        }
    }

    /// Starts from the board's seed events and daily counters.
    pub fn seeded(now: DateTime<Utc>, capacity: usize) -> Self {
        let mut events: VecDeque<_> = seed::tracking_events(now).into();
        events.truncate(capacity);
        Self {
            events,
            stats: seed::tracking_stats(),
            capacity,
            mode: TrackingMode::Tracking,
        }
    }

    pub fn with_mode(mut self, mode: TrackingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    pub fn is_tracking(&self) -> bool {
        self.mode == TrackingMode::Tracking
    }

    pub fn set_mode(&mut self, mode: TrackingMode) {
        self.mode = mode;
    }

    pub fn toggle(&mut self) -> TrackingMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest first.
    pub fn events(&self) -> impl Iterator<Item = &TrackingEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn stats(&self) -> TrackingStats {
        self.stats
    }

    /// Prepends the event, drops anything past capacity and updates the
    /// counters.
    pub fn record(&mut self, event: TrackingEvent) {
        self.stats.record(event.event_type);
        self.events.push_front(event);
        self.events.truncate(self.capacity);
    }

    /// One generator tick. Paused trackers never consult the source.
    pub fn tick(&mut self, source: &mut dyn TrackingSource, now: DateTime<Utc>) -> Option<&TrackingEvent> {
        if !self.is_tracking() {
            return None;
        }
        let event = source.next_event(now)?;
        self.record(event);
        self.events.front()
    }

    /// Age of the newest event, `None` when the list is empty.
    pub fn last_update(&self, now: DateTime<Utc>) -> Option<String> {
        self.events.front().map(|e| format_relative(e.timestamp, now))
    }
}
