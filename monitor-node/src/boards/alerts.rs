use chrono::{DateTime, Utc};
use serde::Serialize;
use stocksight_common::{Alert, AlertType};
use tracing::{debug, info};

use crate::error::{MonitorError, Result};
use crate::filter::AlertFilter;
use crate::seed;

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertCounts {
    pub total: usize,
    pub unread: usize,
    /// Critical alerts that are not yet resolved.
    pub critical: usize,
    /// Alerts requiring action that are not yet resolved.
    pub action_required: usize,
}

pub struct AlertBoard {
    alerts: Vec<Alert>,
}

impl AlertBoard {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::new(seed::alerts(now))
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn get(&self, alert_id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == alert_id)
    }

    pub fn mark_read(&mut self, alert_id: &str) -> Result<()> {
        let alert = self.find_mut(alert_id)?;
        alert.is_read = true;
        debug!(alert_id, "Alert marked read");
        Ok(())
    }

    pub fn mark_resolved(&mut self, alert_id: &str) -> Result<()> {
        let alert = self.find_mut(alert_id)?;
        alert.is_resolved = true;
        alert.is_read = true;
        info!(alert_id, "Alert resolved");
        Ok(())
    }

    /// Removes the alert outright; the remaining alerts keep their order.
    pub fn dismiss(&mut self, alert_id: &str) -> Result<Alert> {
        let index = self
            .alerts
            .iter()
            .position(|a| a.id == alert_id)
            .ok_or_else(|| MonitorError::AlertNotFound(alert_id.to_string()))?;
        let removed = self.alerts.remove(index);
        info!(alert_id, "Alert dismissed");
        Ok(removed)
    }

    /// Marks every alert read and returns how many changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for alert in self.alerts.iter_mut().filter(|a| !a.is_read) {
            alert.is_read = true;
            changed += 1;
        }
        debug!(changed, "Marked all alerts read");
        changed
    }

    pub fn unread_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.is_read).count()
    }

    pub fn counts(&self) -> AlertCounts {
        AlertCounts {
            total: self.alerts.len(),
            unread: self.unread_count(),
            critical: self
                .alerts
                .iter()
                .filter(|a| a.alert_type == AlertType::Critical && !a.is_resolved)
                .count(),
            action_required: self
                .alerts
                .iter()
                .filter(|a| a.action_required && !a.is_resolved)
                .count(),
        }
    }

    pub fn filter(&self, filter: &AlertFilter) -> Vec<&Alert> {
        filter.apply(&self.alerts)
    }

    /// The `limit` newest alerts, for the dashboard digest.
    pub fn recent(&self, limit: usize) -> Vec<&Alert> {
        let mut recent = AlertFilter::default().apply(&self.alerts);
        recent.truncate(limit);
        recent
    }

    fn find_mut(&mut self, alert_id: &str) -> Result<&mut Alert> {
        self.alerts
            .iter_mut()
            .find(|a| a.id == alert_id)
            .ok_or_else(|| MonitorError::AlertNotFound(alert_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> AlertBoard {
        AlertBoard::seeded(Utc::now())
    }

    #[test]
    fn seed_counts() {
        assert_eq!(
            board().counts(),
            AlertCounts {
                total: 6,
                unread: 2,
                critical: 1,
                action_required: 2,
            }
        );
    }

    #[test]
    fn mark_all_read_touches_only_the_read_flag() {
        let mut board = board();
        let before = board.alerts().to_vec();
        assert_eq!(board.unread_count(), 2);

        assert_eq!(board.mark_all_read(), 2);
        assert_eq!(board.unread_count(), 0);

        for (old, new) in before.iter().zip(board.alerts()) {
            let expected = Alert {
                is_read: true,
                ..old.clone()
            };
            assert_eq!(new, &expected);
        }
    }

    #[test]
    fn resolving_marks_read_and_leaves_others_alone() {
        let mut board = board();
        let before = board.alerts().to_vec();

        board.mark_resolved("ALT006").unwrap();

        for (old, new) in before.iter().zip(board.alerts()) {
            if old.id == "ALT006" {
                assert!(new.is_resolved);
                assert!(new.is_read);
                assert_eq!(new.title, old.title);
            } else {
                assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn dismiss_removes_exactly_one_and_keeps_order() {
        let mut board = board();
        let removed = board.dismiss("ALT003").unwrap();
        assert_eq!(removed.id, "ALT003");

        let ids: Vec<_> = board.alerts().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["ALT001", "ALT002", "ALT004", "ALT005", "ALT006"]);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut board = board();
        assert!(matches!(board.mark_read("NOPE"), Err(MonitorError::AlertNotFound(_))));
        assert!(matches!(board.dismiss("NOPE"), Err(MonitorError::AlertNotFound(_))));
        assert_eq!(board.alerts().len(), 6);
    }

    #[test]
    fn resolving_clears_critical_and_action_counts() {
        let mut board = board();
        board.mark_resolved("ALT001").unwrap();
        let counts = board.counts();
        assert_eq!(counts.critical, 0);
        assert_eq!(counts.action_required, 1);
        assert_eq!(counts.unread, 1);
    }

    #[test]
    fn recent_digest_is_newest_first() {
        let board = board();
        let ids: Vec<_> = board.recent(3).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["ALT001", "ALT002", "ALT003"]);
    }
}
