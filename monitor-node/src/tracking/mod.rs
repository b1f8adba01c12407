//! Live tracking: the bounded event board, where its events come from, and
//! the timer-driven session that ties them together.

pub mod session;
pub mod source;
pub mod tracker;

pub use session::{TrackingSession, TrackingSnapshot};
pub use source::{RandomTrackingSource, ScriptedSource, TrackingSource};
pub use tracker::{LiveTracker, TrackingMode};
