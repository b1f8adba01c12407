use serde::{Deserialize, Serialize};
use stocksight_common::{RiskLevel, Settings};

use super::{Badge, BadgeVariant, Icon};

/// Day counts at or under which a prediction moves into each risk tier.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RiskThresholds {
    pub critical_days: u32,
    pub high_days: u32,
    pub medium_days: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical_days: 3,
            high_days: 7,
            medium_days: 30,
        }
    }
}

impl RiskThresholds {
    /// The medium tier extends to the configured prediction horizon.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            medium_days: settings.prediction_horizon,
            ..Self::default()
        }
    }
}

pub fn classify_risk(days_until_stock_out: u32, thresholds: RiskThresholds) -> RiskLevel {
    if days_until_stock_out <= thresholds.critical_days {
        RiskLevel::Critical
    } else if days_until_stock_out <= thresholds.high_days {
        RiskLevel::High
    } else if days_until_stock_out <= thresholds.medium_days {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

impl Badge for RiskLevel {
    fn badge(&self) -> BadgeVariant {
        match self {
            RiskLevel::Critical => BadgeVariant::Destructive,
            RiskLevel::High => BadgeVariant::Secondary,
            RiskLevel::Medium => BadgeVariant::Default,
            RiskLevel::Low => BadgeVariant::Outline,
        }
    }
}

pub fn risk_icon(risk: RiskLevel) -> Icon {
    match risk {
        RiskLevel::Critical => Icon::AlertTriangle,
        RiskLevel::High => Icon::TrendingDown,
        RiskLevel::Medium => Icon::Clock,
        RiskLevel::Low => Icon::TrendingUp,
    }
}
