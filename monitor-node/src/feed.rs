//! Dashboard data source. Only the mock feed exists; it fabricates a fresh
//! snapshot on every tick and reports itself connected.

use async_trait::async_trait;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use stocksight_common::RealtimeSnapshot;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::error::{MonitorError, Result};
use crate::metrics::Metrics;
use crate::timers::{lock, Clock, ScopedTimer};

const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

#[async_trait]
pub trait DataSource: Send + Sync {
    fn is_connected(&self) -> bool;
    async fn fetch_snapshot(&self) -> Result<RealtimeSnapshot>;
    fn subscribe(&self) -> broadcast::Receiver<RealtimeSnapshot>;
}

/// One mock dashboard payload.
pub fn synthesize_snapshot<R: Rng + ?Sized>(rng: &mut R, now: chrono::DateTime<chrono::Utc>) -> RealtimeSnapshot {
    RealtimeSnapshot {
        total_items: rng.gen_range(500..1500),
        items_in: rng.gen_range(10..60),
        items_out: rng.gen_range(5..35),
        alerts: rng.gen_range(0..5),
        last_update: now,
    }
}

struct FeedShared<R> {
    rng: Mutex<R>,
    latest: Mutex<RealtimeSnapshot>,
    connected: AtomicBool,
    clock: Arc<dyn Clock>,
    snapshots: broadcast::Sender<RealtimeSnapshot>,
    metrics: Option<Arc<Metrics>>,
}

impl<R: Rng + Send> FeedShared<R> {
    fn tick(&self) {
        let snapshot = synthesize_snapshot(&mut *lock(&self.rng), self.clock.now());
        *lock(&self.latest) = snapshot.clone();

        if let Some(metrics) = &self.metrics {
            metrics.record_dashboard_snapshot();
        }
        debug!(
            total_items = snapshot.total_items,
            items_in = snapshot.items_in,
            items_out = snapshot.items_out,
            alerts = snapshot.alerts,
            "Dashboard snapshot"
        );
        let _ = self.snapshots.send(snapshot);
    }
}

pub struct MockFeed<R> {
    shared: Arc<FeedShared<R>>,
    endpoint: String,
    timer: Option<ScopedTimer>,
}

impl<R: Rng + Send + 'static> MockFeed<R> {
    /// Starts ticking immediately. Until the first tick, `fetch_snapshot`
    /// returns the fallback figures.
    pub fn connect(
        config: &DashboardConfig,
        rng: R,
        clock: Arc<dyn Clock>,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        let (snapshots, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        let shared = Arc::new(FeedShared {
            rng: Mutex::new(rng),
            latest: Mutex::new(RealtimeSnapshot::fallback(clock.now())),
            connected: AtomicBool::new(true),
            clock,
            snapshots,
            metrics,
        });

        let ticker = shared.clone();
        let timer = ScopedTimer::spawn("dashboard-feed", config.period(), move || ticker.tick());

        info!(endpoint = %config.endpoint, "Mock dashboard feed connected");
        Self {
            shared,
            endpoint: config.endpoint.clone(),
            timer: Some(timer),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn latest(&self) -> RealtimeSnapshot {
        lock(&self.shared.latest).clone()
    }

    pub async fn disconnect(&mut self) {
        self.shared.connected.store(false, Ordering::SeqCst);
        if let Some(timer) = self.timer.take() {
            timer.stop().await;
        }
        info!(endpoint = %self.endpoint, "Mock dashboard feed disconnected");
    }
}

#[async_trait]
impl<R: Rng + Send + 'static> DataSource for MockFeed<R> {
    fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::SeqCst)
    }

    async fn fetch_snapshot(&self) -> Result<RealtimeSnapshot> {
        if !self.is_connected() {
            return Err(MonitorError::FeedError(format!("{} is disconnected", self.endpoint)));
        }
        Ok(self.latest())
    }

    fn subscribe(&self) -> broadcast::Receiver<RealtimeSnapshot> {
        self.shared.snapshots.subscribe()
    }
}
