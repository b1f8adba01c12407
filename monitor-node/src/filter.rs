//! Search, filter and sort over the in-memory board lists.
//!
//! Every criterion defaults to "all" and all active criteria combine with AND.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use stocksight_common::{Alert, AlertType, InventoryItem, Prediction, StockStatus};

pub trait Criteria<T: ?Sized> {
    fn matches(&self, item: &T) -> bool;
}

pub fn apply<'a, T, C>(items: &'a [T], criteria: &C) -> Vec<&'a T>
where
    C: Criteria<T>,
{
    items.iter().filter(|item| criteria.matches(item)).collect()
}

/// Case-insensitive substring match of `needle` in any of `fields`. An empty
/// needle matches everything.
pub fn matches_text(needle: &str, fields: &[&str]) -> bool {
    let needle = needle.to_lowercase();
    needle.is_empty() || fields.iter().any(|field| field.to_lowercase().contains(&needle))
}

/// Distinct values in first-seen order.
pub fn distinct_categories<'a, T, F>(items: &'a [T], category: F) -> Vec<&'a str>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut seen = HashSet::new();
    items
        .iter()
        .map(category)
        .filter(|c| seen.insert(*c))
        .collect()
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    pub search: String,
    pub category: Option<String>,
    pub status: Option<StockStatus>,
}

impl InventoryFilter {
    /// Status is passed in because it is derived from settings the item does
    /// not carry.
    pub fn matches(&self, item: &InventoryItem, status: StockStatus) -> bool {
        matches_text(&self.search, &[&item.name, &item.id])
            && self.category.as_deref().map_or(true, |c| item.category == c)
            && self.status.map_or(true, |s| status == s)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatusFilter {
    #[default]
    All,
    Unread,
    Resolved,
    Unresolved,
}

impl AlertStatusFilter {
    pub fn matches(self, alert: &Alert) -> bool {
        match self {
            AlertStatusFilter::All => true,
            AlertStatusFilter::Unread => !alert.is_read,
            AlertStatusFilter::Resolved => alert.is_resolved,
            AlertStatusFilter::Unresolved => !alert.is_resolved,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub search: String,
    pub alert_type: Option<AlertType>,
    pub status: AlertStatusFilter,
}

impl Criteria<Alert> for AlertFilter {
    fn matches(&self, alert: &Alert) -> bool {
        matches_text(&self.search, &[&alert.title, &alert.description])
            && self.alert_type.map_or(true, |t| alert.alert_type == t)
            && self.status.matches(alert)
    }
}

impl AlertFilter {
    /// Matching alerts, newest first.
    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> Vec<&'a Alert> {
        let mut matched = apply(alerts, self);
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matched
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PredictionFilter {
    pub category: Option<String>,
}

impl Criteria<Prediction> for PredictionFilter {
    fn matches(&self, prediction: &Prediction) -> bool {
        self.category.as_deref().map_or(true, |c| prediction.category == c)
    }
}

impl PredictionFilter {
    /// Matching predictions, soonest stock-out first.
    pub fn apply<'a>(
        &self,
        predictions: &'a [Prediction],
    ) -> Vec<&'a Prediction> {
        let mut matched = apply(predictions, self);
        matched.sort_by_key(|p| p.days_until_stock_out);
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::Utc;
    use proptest::prelude::*;

    #[test]
    fn text_match_is_case_insensitive_over_any_field() {
        assert!(matches_text("think", &["Laptop - ThinkPad X1", "ELEC001"]));
        assert!(matches_text("elec0", &["Laptop - ThinkPad X1", "ELEC001"]));
        assert!(matches_text("", &["anything"]));
        assert!(!matches_text("garden", &["Laptop - ThinkPad X1", "ELEC001"]));
    }

    #[test]
    fn whitespace_in_the_search_is_matched_literally() {
        assert!(!matches_text(" ", &["BOOK003", "Books"]));
        assert!(!matches_text("  x1 ", &["Laptop - ThinkPad X1"]));
        assert!(matches_text(" x1", &["Laptop - ThinkPad X1"]));
        assert!(matches_text(" ", &["Home & Garden"]));
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let items = seed::inventory(Utc::now());
        let categories = distinct_categories(&items, |i| i.category.as_str());
        assert_eq!(categories, vec!["Electronics", "Clothing", "Books", "Home & Garden"]);
    }

    #[test]
    fn alert_filter_sorts_newest_first() {
        let alerts = seed::alerts(Utc::now());
        let ids: Vec<_> = AlertFilter::default()
            .apply(&alerts)
            .into_iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["ALT001", "ALT002", "ALT003", "ALT006", "ALT004", "ALT005"]);
    }

    #[test]
    fn alert_status_filters() {
        let alerts = seed::alerts(Utc::now());
        let unread = AlertFilter {
            status: AlertStatusFilter::Unread,
            ..AlertFilter::default()
        };
        assert_eq!(unread.apply(&alerts).len(), 2);

        let resolved = AlertFilter {
            status: AlertStatusFilter::Resolved,
            ..AlertFilter::default()
        };
        assert_eq!(resolved.apply(&alerts)[0].id, "ALT005");

        let unresolved_warnings = AlertFilter {
            search: "stock".to_string(),
            alert_type: Some(AlertType::Warning),
            status: AlertStatusFilter::Unresolved,
        };
        let ids: Vec<_> = unresolved_warnings.apply(&alerts).iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec!["ALT003"]);
    }

    #[test]
    fn predictions_sort_by_days_remaining() {
        let predictions = seed::predictions(Utc::now());
        let days: Vec<_> = PredictionFilter::default()
            .apply(&predictions)
            .iter()
            .map(|p| p.days_until_stock_out)
            .collect();
        assert_eq!(days, vec![3, 7, 12, 45]);

        let electronics = PredictionFilter {
            category: Some("Electronics".to_string()),
        };
        let ids: Vec<_> = electronics.apply(&predictions).iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec!["PRED001", "PRED004"]);
    }

    fn alert_filter_strategy() -> impl Strategy<Value = AlertFilter> {
        (
            prop_oneof![Just(""), Just("stock"), Just("camera"), Just("ZONE"), Just("xyz")],
            prop_oneof![
                Just(None),
                Just(Some(AlertType::Critical)),
                Just(Some(AlertType::Warning)),
                Just(Some(AlertType::Info)),
                Just(Some(AlertType::System)),
            ],
            prop_oneof![
                Just(AlertStatusFilter::All),
                Just(AlertStatusFilter::Unread),
                Just(AlertStatusFilter::Resolved),
                Just(AlertStatusFilter::Unresolved),
            ],
        )
            .prop_map(|(search, alert_type, status)| AlertFilter {
                search: search.to_string(),
                alert_type,
                status,
            })
    }

    proptest! {
        #[test]
        fn alert_filtering_is_a_subset_satisfying_every_predicate(filter in alert_filter_strategy()) {
            let alerts = seed::alerts(Utc::now());
            let matched = filter.apply(&alerts);

            for alert in &matched {
                prop_assert!(alerts.iter().any(|a| a == *alert));
                prop_assert!(matches_text(&filter.search, &[&alert.title, &alert.description]));
                prop_assert!(filter.alert_type.map_or(true, |t| alert.alert_type == t));
                prop_assert!(filter.status.matches(alert));
            }

            let expected = alerts.iter().filter(|a| filter.matches(a)).count();
            prop_assert_eq!(matched.len(), expected);

            let owned: Vec<Alert> = matched.iter().map(|a| (*a).clone()).collect();
            let again: Vec<Alert> = filter.apply(&owned).into_iter().cloned().collect();
            prop_assert_eq!(again, owned);
        }
    }
}
