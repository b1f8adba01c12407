pub mod boards;
pub mod classify;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod header;
pub mod metrics;
pub mod seed;
pub mod timers;
pub mod tracking;

pub use error::{MonitorError, Result};
