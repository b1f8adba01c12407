//! Per-page state containers. Each board owns its list and derives every
//! status and counter from it on demand.

pub mod alerts;
pub mod analytics;
pub mod cameras;
pub mod inventory;
pub mod predictions;
pub mod settings;

pub use alerts::{AlertBoard, AlertCounts};
pub use analytics::{AnalyticsBoard, MovementTotals, ZoneSummary};
pub use cameras::{CameraBoard, CameraSummary};
pub use inventory::{InventoryBoard, InventoryRow, InventorySummary};
pub use predictions::{DemandRow, PredictionBoard, PredictionRow, PredictionSummary};
pub use settings::SettingsPanel;
