use stocksight_common::{AlertCategory, AlertType, Priority};

use super::{Badge, BadgeVariant, Icon, Tone};

/// Category-specific icons take precedence over the type-based fallback.
pub fn alert_icon(alert_type: AlertType, category: AlertCategory) -> Icon {
    match category {
        AlertCategory::Camera => Icon::Camera,
        AlertCategory::Inventory => Icon::Package,
        AlertCategory::Prediction => Icon::TrendingDown,
        AlertCategory::System => Icon::Settings,
        AlertCategory::Unknown => match alert_type {
            AlertType::Critical | AlertType::Warning => Icon::AlertTriangle,
            AlertType::System => Icon::Settings,
            AlertType::Info | AlertType::Unknown => Icon::Bell,
        },
    }
}

impl Badge for AlertType {
    fn badge(&self) -> BadgeVariant {
        match self {
            AlertType::Critical => BadgeVariant::Destructive,
            AlertType::Warning => BadgeVariant::Secondary,
            AlertType::Info => BadgeVariant::Default,
            AlertType::System | AlertType::Unknown => BadgeVariant::Outline,
        }
    }
}

pub fn priority_tone(priority: Priority) -> Tone {
    match priority {
        Priority::High => Tone::Destructive,
        Priority::Medium => Tone::Warning,
        Priority::Low | Priority::Unknown => Tone::Muted,
    }
}
