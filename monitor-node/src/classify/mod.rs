//! Derived status and display treatment shared by every board.

pub mod alert;
pub mod risk;
pub mod stock;

use serde::Serialize;

pub use alert::{alert_icon, priority_tone};
pub use risk::{classify_risk, risk_icon, RiskThresholds};
pub use stock::{classify_stock, stock_icon, StockThresholds};

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Destructive,
    Secondary,
    Default,
    Outline,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    AlertTriangle,
    Bell,
    Camera,
    Clock,
    Package,
    Settings,
    TrendingDown,
    TrendingUp,
}

/// Text tone for secondary labels such as alert priority or camera status.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Destructive,
    Warning,
    Success,
    Muted,
}

pub trait Badge {
    fn badge(&self) -> BadgeVariant;
}
