use serde::{Deserialize, Serialize};
use std::time::Duration;
use stocksight_common::{ForecastHorizon, Settings, TimeRange};

use crate::error::{MonitorError, Result};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    pub node_id: String,
    pub tracking: TrackingConfig,
    pub dashboard: DashboardConfig,
    pub header: HeaderConfig,
    pub analytics: AnalyticsConfig,
    pub settings: Settings,
    pub logging: LoggingConfig,
    pub monitoring: MonitoringConfig,
}

/// Shape of the simulated live-tracking generator.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrackingConfig {
    pub period_ms: u64,
    /// Chance that a tick produces an event.
    pub event_probability: f64,
    /// Chance that a produced event is an entry rather than an exit.
    pub entry_probability: f64,
    pub capacity: usize,
    pub camera_count: u32,
    pub zone_count: u8,
    pub min_confidence: f64,
    pub start_tracking: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub period_ms: u64,
    pub endpoint: String,
    pub recent_alerts: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HeaderConfig {
    pub clock_period_ms: u64,
}

/// Initial selector values for the analytics and forecast charts.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub time_range: TimeRange,
    pub forecast_horizon: ForecastHorizon,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enable_metrics: bool,
    pub report_interval_sec: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            node_id: "stocksight-monitor-1".to_string(),
            tracking: TrackingConfig::default(),
            dashboard: DashboardConfig::default(),
            header: HeaderConfig::default(),
            analytics: AnalyticsConfig::default(),
            settings: Settings::default(),
            logging: LoggingConfig::default(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            period_ms: 3000,
            event_probability: 0.3,
            entry_probability: 0.4,
            capacity: 10,
            camera_count: 4,
            zone_count: 4,
            min_confidence: 0.8,
            start_tracking: true,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            period_ms: 3000,
            endpoint: "ws://localhost:8000/ws".to_string(),
            recent_alerts: 3,
        }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self { clock_period_ms: 1000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enable_metrics: true,
            report_interval_sec: 60,
        }
    }
}

impl TrackingConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.period_ms == 0 {
            return Err(MonitorError::ConfigError("tracking.period_ms must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.event_probability) {
            return Err(MonitorError::ConfigError(format!(
                "tracking.event_probability {} outside [0, 1]",
                self.event_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.entry_probability) {
            return Err(MonitorError::ConfigError(format!(
                "tracking.entry_probability {} outside [0, 1]",
                self.entry_probability
            )));
        }
        if !(0.0..1.0).contains(&self.min_confidence) {
            return Err(MonitorError::ConfigError(format!(
                "tracking.min_confidence {} outside [0, 1)",
                self.min_confidence
            )));
        }
        if self.capacity == 0 {
            return Err(MonitorError::ConfigError("tracking.capacity must be positive".to_string()));
        }
        if self.camera_count == 0 {
            return Err(MonitorError::ConfigError("tracking.camera_count must be positive".to_string()));
        }
        if !(1..=26).contains(&self.zone_count) {
            return Err(MonitorError::ConfigError(format!(
                "tracking.zone_count {} outside 1..=26",
                self.zone_count
            )));
        }
        Ok(())
    }
}

impl DashboardConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

impl HeaderConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.clock_period_ms)
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<()> {
        self.tracking.validate()?;
        if self.dashboard.period_ms == 0 || self.header.clock_period_ms == 0 {
            return Err(MonitorError::ConfigError("timer periods must be positive".to_string()));
        }
        validator::Validate::validate(&self.settings)?;
        Ok(())
    }
}

/// Loads configuration from an optional YAML file layered under
/// `STOCKSIGHT__*` environment variables.
pub fn load_config(path: &str) -> Result<MonitorConfig> {
    use config::Config;

    let settings = Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("STOCKSIGHT").separator("__"))
        .build()?;

    let config: MonitorConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(MonitorConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config("config/does-not-exist").unwrap();
        assert_eq!(config.tracking, TrackingConfig::default());
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let config = load_config("config/monitor.yaml").unwrap();
        assert_eq!(config, MonitorConfig::default());
    }

    #[test]
    fn probability_out_of_range_is_rejected() {
        let config = TrackingConfig {
            event_probability: 1.5,
            ..TrackingConfig::default()
        };
        assert!(matches!(config.validate(), Err(MonitorError::ConfigError(_))));
    }

    #[test]
    fn invalid_settings_surface_as_settings_error() {
        let mut config = MonitorConfig::default();
        config.settings.model_accuracy_threshold = f64::NAN;
        assert!(matches!(config.validate(), Err(MonitorError::InvalidSettings(_))));
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let yaml = "tracking:\n  period_ms: 500\nsettings:\n  critical_stock_threshold: 8\n";
        let config: MonitorConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tracking.period_ms, 500);
        assert_eq!(config.tracking.capacity, 10);
        assert_eq!(config.settings.critical_stock_threshold, 8);
        assert_eq!(config.settings.low_stock_threshold, 20);
    }

    #[test]
    fn analytics_selectors_use_dashboard_labels() {
        let yaml = "analytics:\n  time_range: \"24h\"\n  forecast_horizon: \"90d\"\n";
        let config: MonitorConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.analytics.time_range, TimeRange::Day);
        assert_eq!(config.analytics.forecast_horizon, ForecastHorizon::Quarter);

        assert!(serde_yaml::from_str::<MonitorConfig>("analytics:\n  time_range: \"1y\"\n").is_err());
    }
}
