use stocksight_common::Settings;
use tracing::info;
use validator::Validate;

use crate::error::Result;

/// Saved settings plus the operator's unsaved edits. Nothing leaves memory.
pub struct SettingsPanel {
    saved: Settings,
    draft: Settings,
}

impl SettingsPanel {
    pub fn new(saved: Settings) -> Self {
        Self {
            draft: saved.clone(),
            saved,
        }
    }

    pub fn saved(&self) -> &Settings {
        &self.saved
    }

    pub fn draft(&self) -> &Settings {
        &self.draft
    }

    pub fn edit<F>(&mut self, change: F)
    where
        F: FnOnce(&mut Settings),
    {
        change(&mut self.draft);
    }

    pub fn is_dirty(&self) -> bool {
        self.saved != self.draft
    }

    /// Replaces the draft with factory defaults. The saved copy is untouched
    /// until `save`.
    pub fn reset_to_defaults(&mut self) {
        self.draft = Settings::default();
    }

    pub fn discard(&mut self) {
        self.draft = self.saved.clone();
    }

    /// Validates the draft and commits it. An invalid draft is kept for
    /// correction and the saved copy stays as it was.
    pub fn save(&mut self) -> Result<&Settings> {
        self.draft.validate()?;
        self.saved = self.draft.clone();
        info!(
            critical = self.saved.critical_stock_threshold,
            low = self.saved.low_stock_threshold,
            high = self.saved.high_stock_threshold,
            "Settings saved"
        );
        Ok(&self.saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;

    #[test]
    fn edits_stay_in_draft_until_saved() {
        let mut panel = SettingsPanel::new(Settings::default());
        panel.edit(|s| s.frame_rate = 25);
        assert!(panel.is_dirty());
        assert_eq!(panel.saved().frame_rate, 30);

        panel.save().unwrap();
        assert!(!panel.is_dirty());
        assert_eq!(panel.saved().frame_rate, 25);
    }

    #[test]
    fn invalid_draft_is_rejected_and_kept() {
        let mut panel = SettingsPanel::new(Settings::default());
        panel.edit(|s| s.model_accuracy_threshold = f64::NAN);

        assert!(matches!(panel.save(), Err(MonitorError::InvalidSettings(_))));
        assert!(panel.draft().model_accuracy_threshold.is_nan());
        assert_eq!(panel.saved().model_accuracy_threshold, 0.8);
    }

    #[test]
    fn reset_and_discard() {
        let mut panel = SettingsPanel::new(Settings {
            retention_days: 90,
            ..Settings::default()
        });
        panel.reset_to_defaults();
        assert_eq!(panel.draft().retention_days, 30);
        assert!(panel.is_dirty());

        panel.discard();
        assert_eq!(panel.draft().retention_days, 90);
        assert!(!panel.is_dirty());
    }
}
