use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] validator::ValidationErrors),

    #[error("Alert not found: {0}")]
    AlertNotFound(String),

    #[error("Camera not found: {0}")]
    CameraNotFound(String),

    #[error("Feed error: {0}")]
    FeedError(String),

    #[error("Metrics error: {0}")]
    MetricsError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<config::ConfigError> for MonitorError {
    fn from(error: config::ConfigError) -> Self {
        MonitorError::ConfigError(error.to_string())
    }
}

impl From<prometheus::Error> for MonitorError {
    fn from(error: prometheus::Error) -> Self {
        MonitorError::MetricsError(error.to_string())
    }
}

impl From<serde_json::Error> for MonitorError {
    fn from(error: serde_json::Error) -> Self {
        MonitorError::SerializationError(error.to_string())
    }
}

impl From<serde_yaml::Error> for MonitorError {
    fn from(error: serde_yaml::Error) -> Self {
        MonitorError::SerializationError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
