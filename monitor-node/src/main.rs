use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use stocksight_common::utils::{format_duration, format_relative};
use stocksight_monitor::boards::{
    AlertBoard, AnalyticsBoard, CameraBoard, InventoryBoard, PredictionBoard, SettingsPanel,
};
use stocksight_monitor::classify::{alert_icon, priority_tone, Badge};
use stocksight_monitor::config::{load_config, MonitorConfig};
use stocksight_monitor::error::{MonitorError, Result};
use stocksight_monitor::feed::{DataSource, MockFeed};
use stocksight_monitor::filter::{AlertFilter, AlertStatusFilter};
use stocksight_monitor::header::HeaderClock;
use stocksight_monitor::metrics::Metrics;
use stocksight_monitor::timers::{Clock, SystemClock};
use stocksight_monitor::tracking::{LiveTracker, RandomTrackingSource, TrackingMode, TrackingSession};
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "config/monitor.yaml")]
    config: String,

    /// Log level, overrides `logging.level` from the config
    #[arg(short, long)]
    log_level: Option<String>,

    /// Stop after this many seconds instead of waiting for a signal
    #[arg(short, long)]
    duration: Option<u64>,

    /// Seed the mock generators for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args.config)?;
    if args.print_config {
        println!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    init_logging(args.log_level.as_deref().unwrap_or(config.logging.level.as_str()))?;
    info!("Starting StockSight monitor {}", config.node_id);

    let app_state = AppState::new(config)?;
    app_state.log_boards();

    let clock = app_state.clock.clone();
    let metrics = app_state.metrics.clone();
    let config = &app_state.config;

    let header = HeaderClock::mount(
        config.header.period(),
        clock.clone(),
        app_state.alerts.unread_count(),
        metrics.clone(),
    );

    let mut feed = MockFeed::connect(&config.dashboard, rng(args.seed, 0), clock.clone(), metrics.clone());

    let source = RandomTrackingSource::new(&config.tracking, rng(args.seed, 1))?;
    let tracker = LiveTracker::seeded(clock.now(), config.tracking.capacity).with_mode(
        if config.tracking.start_tracking {
            TrackingMode::Tracking
        } else {
            TrackingMode::Paused
        },
    );
    let tracking = TrackingSession::mount(
        tracker,
        Box::new(source),
        config.tracking.period(),
        clock.clone(),
        metrics.clone(),
    );

    let mut tracking_events = tracking.subscribe();
    let event_logger = tokio::spawn(async move {
        loop {
            match tracking_events.recv().await {
                Ok(event) => info!(
                    event_type = ?event.event_type,
                    item = %event.item,
                    camera = %event.camera,
                    zone = %event.zone,
                    confidence = event.confidence,
                    "Tracking event"
                ),
                Err(RecvError::Lagged(missed)) => warn!(missed, "Tracking log fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut snapshots = feed.subscribe();
    let snapshot_logger = tokio::spawn(async move {
        loop {
            match snapshots.recv().await {
                Ok(snapshot) => info!(
                    total_items = snapshot.total_items,
                    items_in = snapshot.items_in,
                    items_out = snapshot.items_out,
                    alerts = snapshot.alerts,
                    "Dashboard refreshed"
                ),
                Err(RecvError::Lagged(missed)) => warn!(missed, "Dashboard log fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let reporter = metrics
        .clone()
        .map(|metrics| spawn_metrics_reporter(metrics, config.monitoring.report_interval_sec));

    let started = std::time::Instant::now();
    wait_for_shutdown(args.duration.map(Duration::from_secs)).await;
    info!("Shutting down StockSight monitor after {}", format_duration(started.elapsed()));

    if let Some(reporter) = reporter {
        reporter.abort();
    }

    let header_state = header.state();
    header.unmount().await;

    match feed.fetch_snapshot().await {
        Ok(snapshot) => info!(
            total_items = snapshot.total_items,
            items_in = snapshot.items_in,
            items_out = snapshot.items_out,
            alerts = snapshot.alerts,
            "Last dashboard snapshot"
        ),
        Err(e) => error!("Failed to read dashboard snapshot: {}", e),
    }
    feed.disconnect().await;

    let board = tracking.unmount().await;
    info!(
        time = %header_state.display_time,
        total_today = board.stats.total_today,
        entries = board.stats.entries_count,
        exits = board.stats.exits_count,
        net_change = board.stats.net_change,
        buffered = board.events.len(),
        last_update = board.last_update.as_deref().unwrap_or("never"),
        "Live tracking final state"
    );

    drop(feed);
    let _ = tokio::join!(event_logger, snapshot_logger);

    if let Some(metrics) = &metrics {
        match metrics.render() {
            Ok(text) => info!("Final metrics:\n{}", text),
            Err(e) => error!("Failed to render metrics: {}", e),
        }
    }

    Ok(())
}

fn rng(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_entropy(),
    }
}

fn init_logging(level: &str) -> Result<()> {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| MonitorError::ConfigError(e.to_string()))?;

    Ok(())
}

fn spawn_metrics_reporter(metrics: Arc<Metrics>, interval_sec: u64) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_secs(interval_sec.max(1));
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            interval.tick().await;
            match metrics.render() {
                Ok(text) => info!("Metrics report:\n{}", text),
                Err(e) => error!("Failed to render metrics: {}", e),
            }
        }
    })
}

async fn wait_for_shutdown(limit: Option<Duration>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let deadline = async {
        match limit {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = ctrl_c => info!("Shutdown signal received"),
        _ = terminate => info!("Shutdown signal received"),
        _ = deadline => info!("Run duration elapsed"),
    }
}

/// Every board the monitor mounts, seeded and ready.
pub struct AppState {
    pub config: MonitorConfig,
    pub clock: Arc<dyn Clock>,
    pub metrics: Option<Arc<Metrics>>,
    pub inventory: InventoryBoard,
    pub alerts: AlertBoard,
    pub cameras: CameraBoard,
    pub predictions: PredictionBoard,
    pub analytics: AnalyticsBoard,
    pub settings: SettingsPanel,
}

impl AppState {
    pub fn new(config: MonitorConfig) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let now = clock.now();

        let metrics = if config.monitoring.enable_metrics {
            Some(Arc::new(Metrics::new()?))
        } else {
            None
        };

        let settings = SettingsPanel::new(config.settings.clone());
        let mut predictions = PredictionBoard::seeded(now, settings.saved());
        predictions.set_horizon(config.analytics.forecast_horizon);
        let mut analytics = AnalyticsBoard::seeded();
        analytics.set_time_range(config.analytics.time_range);

        Ok(Self {
            inventory: InventoryBoard::seeded(now, settings.saved()),
            alerts: AlertBoard::seeded(now),
            cameras: CameraBoard::seeded(now),
            predictions,
            analytics,
            settings,
            clock,
            metrics,
            config,
        })
    }

    fn log_boards(&self) {
        let now = self.clock.now();

        let inventory = self.inventory.summary();
        info!(
            total = inventory.total,
            normal = inventory.normal,
            low = inventory.low,
            critical = inventory.critical,
            overstocked = inventory.overstocked,
            "Inventory loaded"
        );

        let alerts = self.alerts.counts();
        info!(
            total = alerts.total,
            unread = alerts.unread,
            critical = alerts.critical,
            action_required = alerts.action_required,
            "Alerts loaded"
        );
        for alert in self.alerts.recent(self.config.dashboard.recent_alerts) {
            info!(
                alert_id = %alert.id,
                priority = ?alert.priority,
                tone = ?priority_tone(alert.priority),
                badge = ?alert.alert_type.badge(),
                icon = ?alert_icon(alert.alert_type, alert.category),
                age = %format_relative(alert.timestamp, now),
                "Recent alert: {}",
                alert.title
            );
        }
        let unread = AlertFilter {
            status: AlertStatusFilter::Unread,
            ..AlertFilter::default()
        };
        for alert in self.alerts.filter(&unread) {
            warn!(alert_id = %alert.id, "Unread alert: {}", alert.title);
        }

        let cameras = self.cameras.summary();
        info!(
            total = cameras.total,
            online = cameras.online,
            offline = cameras.offline,
            error = cameras.error,
            recording = cameras.recording,
            "Cameras loaded"
        );

        let predictions = self.predictions.summary();
        info!(
            total = predictions.total,
            critical = predictions.critical,
            average_days = predictions.average_days_until_stock_out.unwrap_or(0.0),
            "Predictions loaded"
        );
        if let Some(last) = self.predictions.forecast().last() {
            info!(
                horizon_days = self.predictions.horizon().days(),
                point = %last.label(),
                predicted = last.predicted,
                lower = last.lower,
                upper = last.upper,
                "Stock forecast"
            );
        }
        for row in self.predictions.demand() {
            info!(
                category = %row.forecast.category,
                current_week = row.forecast.current_week,
                next_week = row.forecast.next_week,
                growth_percent = row.growth_percent.unwrap_or(0.0),
                trend = ?row.trend,
                "Demand forecast"
            );
        }

        let movements = self.analytics.movement_totals();
        let zones = self.analytics.zone_summary();
        let peaks: Vec<_> = self.analytics.peak_hours(2).iter().map(|h| h.hour.clone()).collect();
        info!(
            range = self.analytics.time_range().label(),
            items_in = movements.items_in,
            items_out = movements.items_out,
            net = movements.net,
            detections = zones.detections,
            average_accuracy = zones.average_accuracy.unwrap_or(0.0),
            peak_hours = ?peaks,
            "Analytics loaded"
        );
    }
}
