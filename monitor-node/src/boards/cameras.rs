use chrono::{DateTime, Utc};
use serde::Serialize;
use stocksight_common::{CameraFeed, CameraStatus};

use crate::classify::Tone;
use crate::error::{MonitorError, Result};
use crate::seed;

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraSummary {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub error: usize,
    pub recording: usize,
}

pub fn status_tone(status: CameraStatus) -> Tone {
    match status {
        CameraStatus::Online => Tone::Success,
        CameraStatus::Offline => Tone::Muted,
        CameraStatus::Error => Tone::Destructive,
    }
}

pub struct CameraBoard {
    cameras: Vec<CameraFeed>,
    selected: Option<String>,
    fullscreen: bool,
}

impl CameraBoard {
    pub fn new(cameras: Vec<CameraFeed>) -> Self {
        Self {
            cameras,
            selected: None,
            fullscreen: false,
        }
    }

    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::new(seed::cameras(now))
    }

    pub fn cameras(&self) -> &[CameraFeed] {
        &self.cameras
    }

    pub fn summary(&self) -> CameraSummary {
        let mut summary = CameraSummary {
            total: self.cameras.len(),
            ..CameraSummary::default()
        };
        for camera in &self.cameras {
            match camera.status {
                CameraStatus::Online => summary.online += 1,
                CameraStatus::Offline => summary.offline += 1,
                CameraStatus::Error => summary.error += 1,
            }
            if camera.is_recording {
                summary.recording += 1;
            }
        }
        summary
    }

    pub fn select(&mut self, camera_id: &str) -> Result<&CameraFeed> {
        let camera = self
            .cameras
            .iter()
            .find(|c| c.id == camera_id)
            .ok_or_else(|| MonitorError::CameraNotFound(camera_id.to_string()))?;
        self.selected = Some(camera.id.clone());
        Ok(camera)
    }

    pub fn selected(&self) -> Option<&CameraFeed> {
        let id = self.selected.as_deref()?;
        self.cameras.iter().find(|c| c.id == id)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.fullscreen = false;
    }

    /// Fullscreen only applies to a selected camera.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = self.selected.is_some() && !self.fullscreen;
        self.fullscreen
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}
