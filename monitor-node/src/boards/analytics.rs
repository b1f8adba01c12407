use serde::Serialize;
use std::collections::HashMap;
use stocksight_common::{CategoryShare, HourlyActivity, MovementPoint, TimeRange, ZonePerformance};
use tracing::debug;

use crate::seed;

/// Movement totals over the selected range.
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementTotals {
    pub items_in: u64,
    pub items_out: u64,
    pub net: i64,
}

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq)]
pub struct ZoneSummary {
    pub zones: usize,
    pub detections: u64,
    /// `None` when no zone reports.
    pub average_accuracy: Option<f64>,
    pub average_uptime: Option<f64>,
}

/// Movement trends, category split, busy hours and per-zone detection
/// performance. Only the movement series depends on the selected range.
pub struct AnalyticsBoard {
    movements: HashMap<TimeRange, Vec<MovementPoint>>,
    categories: Vec<CategoryShare>,
    busy_hours: Vec<HourlyActivity>,
    zones: Vec<ZonePerformance>,
    range: TimeRange,
}

impl AnalyticsBoard {
    pub fn new(
        movements: HashMap<TimeRange, Vec<MovementPoint>>,
        categories: Vec<CategoryShare>,
        busy_hours: Vec<HourlyActivity>,
        zones: Vec<ZonePerformance>,
    ) -> Self {
        Self {
            movements,
            categories,
            busy_hours,
            zones,
            range: TimeRange::default(),
        }
    }

    pub fn seeded() -> Self {
        let movements = TimeRange::ALL
            .into_iter()
            .map(|range| (range, seed::movements(range)))
            .collect();
        Self::new(
            movements,
            seed::category_distribution(),
            seed::busy_hours(),
            seed::zone_performance(),
        )
    }

    pub fn time_range(&self) -> TimeRange {
        self.range
    }

    pub fn set_time_range(&mut self, range: TimeRange) {
        debug!(range = range.label(), "Analytics range selected");
        self.range = range;
    }

    /// The series for the selected range, empty if none was loaded.
    pub fn movements(&self) -> &[MovementPoint] {
        self.movements.get(&self.range).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn movement_totals(&self) -> MovementTotals {
        self.movements().iter().fold(MovementTotals::default(), |mut totals, point| {
            totals.items_in += u64::from(point.items_in);
            totals.items_out += u64::from(point.items_out);
            totals.net += point.net();
            totals
        })
    }

    pub fn categories(&self) -> &[CategoryShare] {
        &self.categories
    }

    pub fn busy_hours(&self) -> &[HourlyActivity] {
        &self.busy_hours
    }

    /// The `limit` busiest hours, busiest first. Ties keep clock order.
    pub fn peak_hours(&self, limit: usize) -> Vec<&HourlyActivity> {
        let mut hours: Vec<_> = self.busy_hours.iter().collect();
        hours.sort_by(|a, b| b.activity.cmp(&a.activity));
        hours.truncate(limit);
        hours
    }

    pub fn zones(&self) -> &[ZonePerformance] {
        &self.zones
    }

    pub fn zone_summary(&self) -> ZoneSummary {
        let zones = self.zones.len();
        let mean = |field: fn(&ZonePerformance) -> f64| {
            (zones > 0).then(|| self.zones.iter().map(field).sum::<f64>() / zones as f64)
        };

        ZoneSummary {
            zones,
            detections: self.zones.iter().map(|z| u64::from(z.detections)).sum(),
            average_accuracy: mean(|z| z.accuracy),
            average_uptime: mean(|z| z.uptime),
        }
    }
}
