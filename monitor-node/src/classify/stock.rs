use serde::{Deserialize, Serialize};
use stocksight_common::{InventoryItem, MovementType, StockStatus};

use super::{Badge, BadgeVariant, Icon};

/// Stock boundaries for one item. `critical` is global, `min`/`max` belong to
/// the item.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct StockThresholds {
    pub critical: u32,
    pub min: u32,
    pub max: u32,
}

impl StockThresholds {
    pub fn for_item(item: &InventoryItem, critical: u32) -> Self {
        Self {
            critical,
            min: item.min_threshold,
            max: item.max_threshold,
        }
    }
}

/// Lower bounds are inclusive and the upper bound exclusive: stock equal to
/// `critical` is critical, equal to `min` or `max` is normal.
pub fn classify_stock(stock: u32, thresholds: StockThresholds) -> StockStatus {
    if stock <= thresholds.critical {
        StockStatus::Critical
    } else if stock < thresholds.min {
        StockStatus::Low
    } else if stock > thresholds.max {
        StockStatus::Overstocked
    } else {
        StockStatus::Normal
    }
}

impl Badge for StockStatus {
    fn badge(&self) -> BadgeVariant {
        match self {
            StockStatus::Critical => BadgeVariant::Destructive,
            StockStatus::Low => BadgeVariant::Secondary,
            StockStatus::Overstocked => BadgeVariant::Default,
            StockStatus::Normal => BadgeVariant::Outline,
        }
    }
}

pub fn stock_icon(status: StockStatus, movement: MovementType) -> Icon {
    match (status, movement) {
        (StockStatus::Critical | StockStatus::Low, _) => Icon::AlertTriangle,
        (_, MovementType::In) => Icon::TrendingUp,
        (_, MovementType::Out) => Icon::TrendingDown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const THRESHOLDS: StockThresholds = StockThresholds {
        critical: 5,
        min: 10,
        max: 50,
    };

    #[test]
    fn boundaries_resolve_consistently() {
        assert_eq!(classify_stock(5, THRESHOLDS), StockStatus::Critical);
        assert_eq!(classify_stock(6, THRESHOLDS), StockStatus::Low);
        assert_eq!(classify_stock(9, THRESHOLDS), StockStatus::Low);
        assert_eq!(classify_stock(10, THRESHOLDS), StockStatus::Normal);
        assert_eq!(classify_stock(50, THRESHOLDS), StockStatus::Normal);
        assert_eq!(classify_stock(51, THRESHOLDS), StockStatus::Overstocked);
        assert_eq!(classify_stock(0, THRESHOLDS), StockStatus::Critical);
    }

    #[test]
    fn critical_wins_over_inverted_thresholds() {
        let inverted = StockThresholds {
            critical: 5,
            min: 40,
            max: 10,
        };
        assert_eq!(classify_stock(3, inverted), StockStatus::Critical);
        assert_eq!(classify_stock(20, inverted), StockStatus::Low);
        assert_eq!(classify_stock(45, inverted), StockStatus::Overstocked);
    }

    #[test]
    fn icons_follow_status_then_movement() {
        assert_eq!(stock_icon(StockStatus::Low, MovementType::In), Icon::AlertTriangle);
        assert_eq!(stock_icon(StockStatus::Normal, MovementType::In), Icon::TrendingUp);
        assert_eq!(stock_icon(StockStatus::Overstocked, MovementType::Out), Icon::TrendingDown);
    }

    proptest! {
        #[test]
        fn classification_is_total_and_ordered(
            stock in 0u32..1_000,
            critical in 0u32..50,
            min in 0u32..200,
            max in 0u32..400,
        ) {
            let thresholds = StockThresholds { critical, min, max };
            let status = classify_stock(stock, thresholds);
            prop_assert!(StockStatus::ALL.contains(&status));

            match status {
                StockStatus::Critical => prop_assert!(stock <= critical),
                StockStatus::Low => prop_assert!(stock > critical && stock < min),
                StockStatus::Overstocked => prop_assert!(stock > critical && stock >= min && stock > max),
                StockStatus::Normal => prop_assert!(stock > critical && stock >= min && stock <= max),
            }
        }
    }
}
