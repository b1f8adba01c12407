//! Seed data each board starts from. Timestamps are relative to `now`.

use chrono::{DateTime, Duration, Utc};
use stocksight_common::{
    Alert, AlertCategory, AlertType, CameraFeed, CameraStatus, CategoryShare, DemandForecast,
    ForecastPoint, HourlyActivity, InventoryItem, MovementPoint, MovementType, Prediction, Priority,
    TimeRange, TrackingEvent, TrackingEventType, TrackingStats, TrendDirection, ZonePerformance,
};

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    category: &str,
    stock: u32,
    (min, max): (u32, u32),
    location: &str,
    last_movement: DateTime<Utc>,
    movement_type: MovementType,
) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        current_stock: stock,
        min_threshold: min,
        max_threshold: max,
        location: location.to_string(),
        last_movement,
        movement_type,
    }
}

pub fn inventory(now: DateTime<Utc>) -> Vec<InventoryItem> {
    vec![
        item(
            "ELEC001",
            "Laptop - ThinkPad X1",
            "Electronics",
            45,
            (20, 100),
            "Zone A - Electronics",
            now - Duration::minutes(2),
            MovementType::In,
        ),
        item(
            "CLTH002",
            "Cotton T-Shirts (Pack)",
            "Clothing",
            8,
            (15, 80),
            "Zone B - Clothing",
            now - Duration::minutes(5),
            MovementType::Out,
        ),
        item(
            "BOOK003",
            "Programming Books Set",
            "Books",
            5,
            (10, 50),
            "Zone C - Books",
            now - Duration::minutes(10),
            MovementType::Out,
        ),
        item(
            "HOME004",
            "Garden Tools Kit",
            "Home & Garden",
            95,
            (20, 80),
            "Zone D - Home & Garden",
            now - Duration::minutes(3),
            MovementType::In,
        ),
        item(
            "ELEC005",
            "Wireless Headphones",
            "Electronics",
            67,
            (25, 100),
            "Zone A - Electronics",
            now - Duration::minutes(4),
            MovementType::Out,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn alert(
    id: &str,
    alert_type: AlertType,
    title: &str,
    description: &str,
    source: &str,
    timestamp: DateTime<Utc>,
    (is_read, is_resolved): (bool, bool),
    category: AlertCategory,
    priority: Priority,
    action_required: bool,
) -> Alert {
    Alert {
        id: id.to_string(),
        alert_type,
        title: title.to_string(),
        description: description.to_string(),
        source: source.to_string(),
        timestamp,
        is_read,
        is_resolved,
        category,
        priority,
        action_required,
    }
}

pub fn alerts(now: DateTime<Utc>) -> Vec<Alert> {
    vec![
        alert(
            "ALT001",
            AlertType::Critical,
            "Critical Stock Level - Cotton T-Shirts",
            "Stock level dropped below critical threshold (5 units). Predicted stockout in 3 days.",
            "AI Prediction System",
            now - Duration::minutes(5),
            (false, false),
            AlertCategory::Prediction,
            Priority::High,
            true,
        ),
        alert(
            "ALT002",
            AlertType::Warning,
            "Camera Feed Disconnected",
            "Camera 3 - Loading Dock has lost connection. Last seen 10 minutes ago.",
            "Camera System",
            now - Duration::minutes(10),
            (true, false),
            AlertCategory::Camera,
            Priority::Medium,
            true,
        ),
        alert(
            "ALT003",
            AlertType::Warning,
            "Low Stock Alert - Programming Books",
            "Stock level below minimum threshold. Current: 5 units, Minimum: 10 units.",
            "Inventory Monitor",
            now - Duration::minutes(15),
            (true, false),
            AlertCategory::Inventory,
            Priority::Medium,
            false,
        ),
        alert(
            "ALT004",
            AlertType::Info,
            "Daily Report Generated",
            "Daily inventory movement report has been generated and is ready for review.",
            "Report System",
            now - Duration::hours(1),
            (true, false),
            AlertCategory::System,
            Priority::Low,
            false,
        ),
        alert(
            "ALT005",
            AlertType::System,
            "AI Model Retrained",
            "Prediction model has been successfully retrained with latest data. Accuracy improved to 87.3%.",
            "AI System",
            now - Duration::hours(2),
            (true, true),
            AlertCategory::System,
            Priority::Low,
            false,
        ),
        alert(
            "ALT006",
            AlertType::Warning,
            "High Movement Activity Detected",
            "Unusual high movement activity detected in Zone A. 45% above normal levels.",
            "Movement Monitor",
            now - Duration::minutes(30),
            (false, false),
            AlertCategory::Inventory,
            Priority::Medium,
            false,
        ),
    ]
}

pub fn cameras(now: DateTime<Utc>) -> Vec<CameraFeed> {
    let camera = |id: &str,
                  name: &str,
                  zone: &str,
                  status: CameraStatus,
                  resolution: &str,
                  fps: u32,
                  idle: Duration,
                  detection_count: u32,
                  (is_recording, has_audio): (bool, bool)| CameraFeed {
        id: id.to_string(),
        name: name.to_string(),
        zone: zone.to_string(),
        status,
        resolution: resolution.to_string(),
        fps,
        last_activity: now - idle,
        detection_count,
        is_recording,
        has_audio,
    };

    vec![
        camera(
            "cam-001",
            "Camera 1 - Main Entrance",
            "Zone A - Electronics",
            CameraStatus::Online,
            "1920x1080",
            30,
            Duration::seconds(30),
            156,
            (true, true),
        ),
        camera(
            "cam-002",
            "Camera 2 - Storage Area",
            "Zone B - Clothing",
            CameraStatus::Online,
            "1920x1080",
            25,
            Duration::minutes(2),
            89,
            (true, false),
        ),
        camera(
            "cam-003",
            "Camera 3 - Loading Dock",
            "Zone C - Books",
            CameraStatus::Error,
            "1280x720",
            0,
            Duration::minutes(10),
            23,
            (false, true),
        ),
        camera(
            "cam-004",
            "Camera 4 - Exit Point",
            "Zone D - Home & Garden",
            CameraStatus::Online,
            "1920x1080",
            30,
            Duration::minutes(1),
            67,
            (true, true),
        ),
    ]
}

pub fn predictions(now: DateTime<Utc>) -> Vec<Prediction> {
    let prediction = |id: &str,
                      item: &str,
                      category: &str,
                      current_stock: u32,
                      days: u32,
                      confidence: f64,
                      trend_direction: TrendDirection,
                      recommended_action: &str| Prediction {
        id: id.to_string(),
        item: item.to_string(),
        category: category.to_string(),
        current_stock,
        predicted_stock_out: now + Duration::days(days as i64),
        days_until_stock_out: days,
        confidence,
        trend_direction,
        recommended_action: recommended_action.to_string(),
    };

    vec![
        prediction(
            "PRED001",
            "Laptop - ThinkPad X1",
            "Electronics",
            45,
            12,
            0.89,
            TrendDirection::Down,
            "Order 30-40 units within next week",
        ),
        prediction(
            "PRED002",
            "Cotton T-Shirts (Pack)",
            "Clothing",
            8,
            3,
            0.95,
            TrendDirection::Down,
            "URGENT: Order immediately - high demand expected",
        ),
        prediction(
            "PRED003",
            "Programming Books Set",
            "Books",
            5,
            7,
            0.78,
            TrendDirection::Down,
            "Order 25-30 units this week",
        ),
        prediction(
            "PRED004",
            "Wireless Headphones",
            "Electronics",
            67,
            45,
            0.72,
            TrendDirection::Stable,
            "Monitor trends, order in 3-4 weeks",
        ),
    ]
}

pub fn tracking_events(now: DateTime<Utc>) -> Vec<TrackingEvent> {
    let event = |id: &str, event_type, item: &str, camera: &str, zone: &str, age: Duration, confidence| {
        TrackingEvent {
            id: id.to_string(),
            event_type,
            item: item.to_string(),
            camera: camera.to_string(),
            zone: zone.to_string(),
            timestamp: now - age,
            confidence,
        }
    };

    vec![
        event(
            "1",
            TrackingEventType::Entry,
            "Electronics Box #A001",
            "Camera 1",
            "Zone A - Electronics",
            Duration::seconds(30),
            0.95,
        ),
        event(
            "2",
            TrackingEventType::Exit,
            "Clothing Package #B023",
            "Camera 2",
            "Zone B - Clothing",
            Duration::minutes(2),
            0.88,
        ),
        event(
            "3",
            TrackingEventType::Entry,
            "Books Shipment #C015",
            "Camera 3",
            "Zone C - Books",
            Duration::minutes(3),
            0.92,
        ),
    ]
}

pub fn tracking_stats() -> TrackingStats {
    TrackingStats {
        total_today: 234,
        entries_count: 156,
        exits_count: 78,
        net_change: 78,
    }
}

pub fn movements(range: TimeRange) -> Vec<MovementPoint> {
    let series: &[(&str, u32, u32)] = match range {
        TimeRange::Day => &[
            ("00:00", 12, 8),
            ("04:00", 8, 5),
            ("08:00", 35, 12),
            ("12:00", 28, 22),
            ("16:00", 42, 38),
            ("20:00", 15, 25),
        ],
        TimeRange::Week => &[
            ("Mon", 156, 89),
            ("Tue", 142, 95),
            ("Wed", 178, 123),
            ("Thu", 165, 134),
            ("Fri", 189, 156),
            ("Sat", 134, 98),
            ("Sun", 123, 87),
        ],
        TimeRange::Month => &[
            ("Week 1", 1087, 756),
            ("Week 2", 1156, 834),
            ("Week 3", 1234, 923),
            ("Week 4", 1098, 801),
        ],
    };

    series
        .iter()
        .map(|&(label, items_in, items_out)| MovementPoint {
            label: label.to_string(),
            items_in,
            items_out,
        })
        .collect()
}

pub fn category_distribution() -> Vec<CategoryShare> {
    [
        ("Electronics", 35.0, 1250),
        ("Clothing", 28.0, 980),
        ("Books", 20.0, 720),
        ("Home & Garden", 17.0, 610),
    ]
    .into_iter()
    .map(|(name, percent, count)| CategoryShare {
        name: name.to_string(),
        percent,
        count,
    })
    .collect()
}

pub fn busy_hours() -> Vec<HourlyActivity> {
    [15, 25, 45, 78, 89, 95, 67, 56, 78, 92, 85, 73, 45, 32, 18]
        .into_iter()
        .enumerate()
        .map(|(i, activity)| HourlyActivity {
            hour: format!("{:02}:00", 6 + i),
            activity,
        })
        .collect()
}

pub fn zone_performance() -> Vec<ZonePerformance> {
    [
        ("Zone A", 95.0, 1250, 99.2),
        ("Zone B", 88.0, 980, 97.8),
        ("Zone C", 92.0, 720, 98.5),
        ("Zone D", 87.0, 610, 96.3),
    ]
    .into_iter()
    .map(|(zone, accuracy, detections, uptime)| ZonePerformance {
        zone: zone.to_string(),
        accuracy,
        detections,
        uptime,
    })
    .collect()
}

pub fn stock_forecast() -> Vec<ForecastPoint> {
    let mut points = vec![ForecastPoint {
        days_ahead: 0,
        actual: Some(847),
        predicted: 847,
        lower: 847,
        upper: 847,
    }];
    points.extend(
        [(3, 823, 815, 831), (7, 798, 785, 811), (14, 756, 735, 777), (21, 718, 690, 746), (30, 685, 650, 720)]
            .into_iter()
            .map(|(days_ahead, predicted, lower, upper)| ForecastPoint {
                days_ahead,
                actual: None,
                predicted,
                lower,
                upper,
            }),
    );
    points
}

pub fn demand_forecast() -> Vec<DemandForecast> {
    [
        ("Electronics", 156, 142),
        ("Clothing", 89, 125),
        ("Books", 67, 71),
        ("Home & Garden", 45, 52),
    ]
    .into_iter()
    .map(|(category, current_week, next_week)| DemandForecast {
        category: category.to_string(),
        current_week,
        next_week,
    })
    .collect()
}
