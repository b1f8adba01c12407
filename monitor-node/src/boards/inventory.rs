use chrono::{DateTime, Utc};
use serde::Serialize;
use stocksight_common::{InventoryItem, Settings, StockStatus};

use crate::classify::{classify_stock, stock_icon, Badge, BadgeVariant, Icon, StockThresholds};
use crate::filter::{distinct_categories, InventoryFilter};
use crate::seed;

/// One inventory row with its derived status and display treatment.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct InventoryRow<'a> {
    pub item: &'a InventoryItem,
    pub status: StockStatus,
    pub badge: BadgeVariant,
    pub icon: Icon,
}

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventorySummary {
    pub total: usize,
    pub normal: usize,
    pub low: usize,
    pub critical: usize,
    pub overstocked: usize,
}

pub struct InventoryBoard {
    items: Vec<InventoryItem>,
    critical_threshold: u32,
}

impl InventoryBoard {
    pub fn new(items: Vec<InventoryItem>, critical_threshold: u32) -> Self {
        Self {
            items,
            critical_threshold,
        }
    }

    pub fn seeded(now: DateTime<Utc>, settings: &Settings) -> Self {
        Self::new(seed::inventory(now), settings.critical_stock_threshold)
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn critical_threshold(&self) -> u32 {
        self.critical_threshold
    }

    /// Re-derives every status against the newly saved settings.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.critical_threshold = settings.critical_stock_threshold;
    }

    pub fn status_of(&self, item: &InventoryItem) -> StockStatus {
        classify_stock(
            item.current_stock,
            StockThresholds::for_item(item, self.critical_threshold),
        )
    }

    pub fn rows(&self) -> Vec<InventoryRow<'_>> {
        self.items.iter().map(|item| self.row(item)).collect()
    }

    pub fn filter(&self, filter: &InventoryFilter) -> Vec<InventoryRow<'_>> {
        self.items
            .iter()
            .map(|item| self.row(item))
            .filter(|row| filter.matches(row.item, row.status))
            .collect()
    }

    pub fn categories(&self) -> Vec<&str> {
        distinct_categories(&self.items, |item| item.category.as_str())
    }

    pub fn summary(&self) -> InventorySummary {
        let mut summary = InventorySummary {
            total: self.items.len(),
            ..InventorySummary::default()
        };
        for item in &self.items {
            match self.status_of(item) {
                StockStatus::Normal => summary.normal += 1,
                StockStatus::Low => summary.low += 1,
                StockStatus::Critical => summary.critical += 1,
                StockStatus::Overstocked => summary.overstocked += 1,
            }
        }
        summary
    }

    fn row<'a>(&self, item: &'a InventoryItem) -> InventoryRow<'a> {
        let status = self.status_of(item);
        InventoryRow {
            item,
            status,
            badge: status.badge(),
            icon: stock_icon(status, item.movement_type),
        }
    }
}
