use chrono::{DateTime, Utc};

pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Human-readable age of `timestamp` relative to `now`, as shown on every board.
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes();

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    timestamp.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn relative_time_buckets() {
        let now = now();
        assert_eq!(format_relative(now - Duration::seconds(30), now), "Just now");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative(now - Duration::minutes(59), now), "59m ago");
        assert_eq!(format_relative(now - Duration::minutes(60), now), "1h ago");
        assert_eq!(format_relative(now - Duration::hours(23), now), "23h ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "2024-03-08");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = now();
        assert_eq!(format_relative(now + Duration::minutes(3), now), "Just now");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(std::time::Duration::from_secs(45)), "45s");
        assert_eq!(format_duration(std::time::Duration::from_secs(59)), "59s");
        assert_eq!(format_duration(std::time::Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_duration(std::time::Duration::from_secs(125)), "2m 5s");
    }
}
