use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertFrequency {
    Immediate,
    Hourly,
    Daily,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RecordingQuality {
    #[serde(rename = "720p")]
    Hd720,
    #[serde(rename = "1080p")]
    FullHd1080,
    #[serde(rename = "4k")]
    Uhd4k,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Operator-editable configuration record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_settings"))]
#[serde(default)]
pub struct Settings {
    #[validate(range(min = 0, max = 50))]
    pub low_stock_threshold: u32,
    #[validate(range(min = 0, max = 20))]
    pub critical_stock_threshold: u32,
    #[validate(range(min = 0, max = 200))]
    pub high_stock_threshold: u32,

    #[validate(range(min = 0.0, max = 1.0))]
    pub model_accuracy_threshold: f64,
    pub retraining_frequency: Frequency,
    #[validate(range(min = 1, max = 365))]
    pub prediction_horizon: u32,

    pub enable_email_alerts: bool,
    pub enable_push_notifications: bool,
    pub alert_frequency: AlertFrequency,

    pub recording_quality: RecordingQuality,
    #[validate(range(min = 1, max = 60))]
    pub frame_rate: u32,
    #[validate(range(min = 1, max = 365))]
    pub retention_days: u32,

    pub backup_frequency: Frequency,
    pub log_level: LogLevel,
    #[validate(custom = "validate_maintenance_window")]
    pub maintenance_window: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            low_stock_threshold: 20,
            critical_stock_threshold: 5,
            high_stock_threshold: 100,
            model_accuracy_threshold: 0.8,
            retraining_frequency: Frequency::Weekly,
            prediction_horizon: 30,
            enable_email_alerts: true,
            enable_push_notifications: true,
            alert_frequency: AlertFrequency::Immediate,
            recording_quality: RecordingQuality::FullHd1080,
            frame_rate: 30,
            retention_days: 30,
            backup_frequency: Frequency::Daily,
            log_level: LogLevel::Info,
            maintenance_window: "02:00".to_string(),
        }
    }
}

/// Cross-field rules. Range checks let NaN through, so it is caught here.
fn validate_settings(settings: &Settings) -> Result<(), ValidationError> {
    if settings.model_accuracy_threshold.is_nan() {
        return Err(ValidationError::new("model_accuracy_threshold"));
    }
    if settings.critical_stock_threshold > settings.low_stock_threshold
        || settings.low_stock_threshold > settings.high_stock_threshold
    {
        return Err(ValidationError::new("threshold_order"));
    }
    Ok(())
}

fn validate_maintenance_window(window: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(window, "%H:%M")
        .map(|_| ())
        .map_err(|_| ValidationError::new("maintenance_window"))
}
