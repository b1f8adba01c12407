use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,
    Out,
}

/// Stock level relative to the configured thresholds. Always derived from the
/// current stock, never stored on the item.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Normal,
    Low,
    Critical,
    Overstocked,
}

impl StockStatus {
    pub const ALL: [StockStatus; 4] = [
        StockStatus::Normal,
        StockStatus::Low,
        StockStatus::Critical,
        StockStatus::Overstocked,
    ];
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub current_stock: u32,
    pub min_threshold: u32,
    pub max_threshold: u32,
    pub location: String,
    pub last_movement: DateTime<Utc>,
    pub movement_type: MovementType,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Critical,
    Warning,
    Info,
    System,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Inventory,
    System,
    Camera,
    Prediction,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub title: String,
    pub description: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    pub is_resolved: bool,
    pub category: AlertCategory,
    pub priority: Priority,
    pub action_required: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrackingEventType {
    Entry,
    Exit,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrackingEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: TrackingEventType,
    pub item: String,
    pub camera: String,
    pub zone: String,
    pub timestamp: DateTime<Utc>,
    pub confidence: f64,
}

/// Running counters for the live tracking board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackingStats {
    pub total_today: u64,
    pub entries_count: u64,
    pub exits_count: u64,
    pub net_change: i64,
}

impl TrackingStats {
    pub fn record(&mut self, event_type: TrackingEventType) {
        self.total_today += 1;
        match event_type {
            TrackingEventType::Entry => {
                self.entries_count += 1;
                self.net_change += 1;
            }
            TrackingEventType::Exit => {
                self.exits_count += 1;
                self.net_change -= 1;
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CameraStatus {
    Online,
    Offline,
    Error,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CameraFeed {
    pub id: String,
    pub name: String,
    pub zone: String,
    pub status: CameraStatus,
    pub resolution: String,
    pub fps: u32,
    pub last_activity: DateTime<Utc>,
    pub detection_count: u32,
    pub is_recording: bool,
    pub has_audio: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Prediction {
    pub id: String,
    pub item: String,
    pub category: String,
    pub current_stock: u32,
    pub predicted_stock_out: DateTime<Utc>,
    pub days_until_stock_out: u32,
    pub confidence: f64,
    pub trend_direction: TrendDirection,
    pub recommended_action: String,
}

/// Payload of one mock dashboard feed tick.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RealtimeSnapshot {
    pub total_items: u32,
    pub items_in: u32,
    pub items_out: u32,
    pub alerts: u32,
    pub last_update: DateTime<Utc>,
}

impl RealtimeSnapshot {
    /// Figures shown before the first feed tick arrives.
    pub fn fallback(now: DateTime<Utc>) -> Self {
        Self {
            total_items: 847,
            items_in: 156,
            items_out: 89,
            alerts: 3,
            last_update: now,
        }
    }
}

/// Window the analytics movement series covers.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeRange {
    #[serde(rename = "24h")]
    Day,
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Day, TimeRange::Week, TimeRange::Month];

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Day => "24h",
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
        }
    }
}

/// Stock moved in and out during one bucket of a movement series.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MovementPoint {
    pub label: String,
    pub items_in: u32,
    pub items_out: u32,
}

impl MovementPoint {
    pub fn net(&self) -> i64 {
        i64::from(self.items_in) - i64::from(self.items_out)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    /// Share of all movements, in percent.
    pub percent: f64,
    pub count: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HourlyActivity {
    /// `HH:00`
    pub hour: String,
    pub activity: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ZonePerformance {
    pub zone: String,
    /// Detection accuracy in percent.
    pub accuracy: f64,
    pub detections: u32,
    /// Camera uptime in percent.
    pub uptime: f64,
}

/// How far ahead the stock forecast reaches.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ForecastHorizon {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl ForecastHorizon {
    pub fn days(self) -> u32 {
        match self {
            ForecastHorizon::Week => 7,
            ForecastHorizon::Month => 30,
            ForecastHorizon::Quarter => 90,
        }
    }
}

/// Projected total stock `days_ahead` from today, with its confidence band.
/// Only today's point carries an actual figure.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ForecastPoint {
    pub days_ahead: u32,
    pub actual: Option<u32>,
    pub predicted: u32,
    pub lower: u32,
    pub upper: u32,
}

impl ForecastPoint {
    pub fn label(&self) -> String {
        if self.days_ahead == 0 {
            "Today".to_string()
        } else {
            format!("+{}d", self.days_ahead)
        }
    }
}

/// Units moved this week and expected next week for one category.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DemandForecast {
    pub category: String,
    pub current_week: u32,
    pub next_week: u32,
}

impl DemandForecast {
    /// Week-over-week change in percent, `None` when nothing moved this week.
    pub fn growth_percent(&self) -> Option<f64> {
        (self.current_week > 0).then(|| {
            (f64::from(self.next_week) - f64::from(self.current_week)) / f64::from(self.current_week) * 100.0
        })
    }

    pub fn trend(&self) -> TrendDirection {
        match self.next_week.cmp(&self.current_week) {
            std::cmp::Ordering::Greater => TrendDirection::Up,
            std::cmp::Ordering::Less => TrendDirection::Down,
            std::cmp::Ordering::Equal => TrendDirection::Stable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_track_entries_and_exits() {
        let mut stats = TrackingStats::default();
        stats.record(TrackingEventType::Entry);
        stats.record(TrackingEventType::Entry);
        stats.record(TrackingEventType::Exit);

        assert_eq!(stats.total_today, 3);
        assert_eq!(stats.entries_count, 2);
        assert_eq!(stats.exits_count, 1);
        assert_eq!(stats.net_change, 1);
    }

    #[test]
    fn unknown_alert_fields_decode_to_fallback_variants() {
        let json = r#"{
            "id": "ALT900",
            "type": "emergency",
            "title": "t",
            "description": "d",
            "source": "s",
            "timestamp": "2024-01-01T00:00:00Z",
            "is_read": false,
            "is_resolved": false,
            "category": "robotics",
            "priority": "urgent",
            "action_required": true
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.alert_type, AlertType::Unknown);
        assert_eq!(alert.category, AlertCategory::Unknown);
        assert_eq!(alert.priority, Priority::Unknown);
    }

    #[test]
    fn tracking_event_uses_type_key() {
        let event = TrackingEvent {
            id: "1".to_string(),
            event_type: TrackingEventType::Exit,
            item: "Item #ABC123".to_string(),
            camera: "Camera 2".to_string(),
            zone: "Zone B".to_string(),
            timestamp: Utc::now(),
            confidence: 0.9,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "exit");
    }

    #[test]
    fn movement_net_can_go_negative() {
        let point = MovementPoint {
            label: "20:00".to_string(),
            items_in: 15,
            items_out: 25,
        };
        assert_eq!(point.net(), -10);
    }

    #[test]
    fn demand_growth_and_trend() {
        let clothing = DemandForecast {
            category: "Clothing".to_string(),
            current_week: 89,
            next_week: 125,
        };
        let growth = clothing.growth_percent().unwrap();
        assert!((growth - 40.449).abs() < 0.01);
        assert_eq!(clothing.trend(), TrendDirection::Up);

        let idle = DemandForecast {
            category: "Idle".to_string(),
            current_week: 0,
            next_week: 0,
        };
        assert_eq!(idle.growth_percent(), None);
        assert_eq!(idle.trend(), TrendDirection::Stable);
    }

    #[test]
    fn selectors_use_dashboard_labels() {
        assert_eq!(serde_json::to_string(&TimeRange::Day).unwrap(), r#""24h""#);
        assert_eq!(serde_json::from_str::<TimeRange>(r#""30d""#).unwrap(), TimeRange::Month);
        assert_eq!(TimeRange::default().label(), "7d");
        assert_eq!(serde_json::from_str::<ForecastHorizon>(r#""90d""#).unwrap().days(), 90);
        assert_eq!(ForecastHorizon::default(), ForecastHorizon::Month);
    }
}
