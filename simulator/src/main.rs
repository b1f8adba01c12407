use anyhow::{Context, Result};
use chrono::{DateTime, Duration as TimeDelta, Utc};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use stocksight_common::{RealtimeSnapshot, TrackingEvent, TrackingStats};
use stocksight_monitor::config::{DashboardConfig, TrackingConfig};
use stocksight_monitor::feed::synthesize_snapshot;
use stocksight_monitor::tracking::{LiveTracker, RandomTrackingSource};
use tokio::time::sleep;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const PROGRESS_EVERY_MS: u64 = 60_000;

#[derive(Parser, Debug)]
#[command(author, version, about = "Offline run of the live tracking generator and dashboard feed")]
struct Args {
    /// Simulated seconds to run
    #[arg(short, long, default_value_t = 1800)]
    duration: u64,

    /// Output directory for JSON chunks
    #[arg(short, long, default_value = "simulation_data")]
    output: PathBuf,

    /// RNG seed; runs with the same seed produce the same files
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Simulated seconds per output chunk
    #[arg(long, default_value_t = 300)]
    chunk_secs: u64,

    /// Wall-clock pause per simulated second, in milliseconds
    #[arg(long, default_value_t = 0)]
    pace_ms: u64,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SimulationSummary {
    pub seed: u64,
    pub simulated_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub tracker_ticks: u64,
    pub events_generated: u64,
    pub snapshots_generated: u64,
    pub chunks_written: u64,
    pub final_stats: TrackingStats,
    pub final_board: Vec<TrackingEvent>,
}

pub struct StockSimulator {
    tracking: TrackingConfig,
    dashboard: DashboardConfig,
    tracker: LiveTracker,
    source: RandomTrackingSource<StdRng>,
    feed_rng: StdRng,
    seed: u64,
    current_time: DateTime<Utc>,
}

impl StockSimulator {
    pub fn new(tracking: TrackingConfig, dashboard: DashboardConfig, seed: u64, start: DateTime<Utc>) -> Result<Self> {
        let source = RandomTrackingSource::seeded(&tracking, seed).context("invalid tracking config")?;
        Ok(Self {
            tracker: LiveTracker::new(tracking.capacity),
            source,
            // Distinct stream so feed draws never perturb the event sequence.
            feed_rng: StdRng::seed_from_u64(seed.wrapping_add(1)),
            tracking,
            dashboard,
            seed,
            current_time: start,
        })
    }

    pub async fn run_simulation(
        &mut self,
        duration_seconds: u64,
        chunk_secs: u64,
        pace: Duration,
        output_path: &Path,
    ) -> Result<SimulationSummary> {
        fs::create_dir_all(output_path)
            .with_context(|| format!("failed to create {}", output_path.display()))?;
        info!(duration_seconds, seed = self.seed, "Starting simulation");

        let started_at = self.current_time;
        let total_ms = duration_seconds.saturating_mul(1000);
        let tracking_ms = self.tracking.period_ms.max(1);
        let dashboard_ms = self.dashboard.period_ms.max(1);
        let chunk_ms = chunk_secs.max(1).saturating_mul(1000);

        let mut next_tracking = tracking_ms;
        let mut next_dashboard = dashboard_ms;
        let mut next_chunk = chunk_ms;
        let mut next_progress = PROGRESS_EVERY_MS;
        let mut elapsed_ms = 0;

        let mut events = Vec::new();
        let mut snapshots = Vec::new();
        let mut tracker_ticks = 0;
        let mut events_generated = 0;
        let mut snapshots_generated = 0;
        let mut chunks_written = 0;

        loop {
            let now_ms = next_tracking.min(next_dashboard).min(next_chunk).min(next_progress);
            if now_ms > total_ms {
                break;
            }
            let seconds_crossed = now_ms / 1000 - elapsed_ms / 1000;
            elapsed_ms = now_ms;
            self.current_time = started_at + TimeDelta::milliseconds(now_ms as i64);

            if now_ms == next_tracking {
                next_tracking += tracking_ms;
                tracker_ticks += 1;
                if let Some(event) = self.tracker.tick(&mut self.source, self.current_time) {
                    events.push(event.clone());
                    events_generated += 1;
                }
            }

            if now_ms == next_dashboard {
                next_dashboard += dashboard_ms;
                snapshots.push(synthesize_snapshot(&mut self.feed_rng, self.current_time));
                snapshots_generated += 1;
            }

            if now_ms == next_chunk {
                next_chunk += chunk_ms;
                self.save_data_chunk(output_path, &events, &snapshots, now_ms / 1000)?;
                chunks_written += 1;
                events.clear();
                snapshots.clear();
            }

            if now_ms == next_progress {
                next_progress += PROGRESS_EVERY_MS;
                let stats = self.tracker.stats();
                info!(
                    step = now_ms / 1000,
                    duration_seconds,
                    total = stats.total_today,
                    net_change = stats.net_change,
                    "Simulation progress"
                );
            }

            if !pace.is_zero() && seconds_crossed > 0 {
                sleep(pace.saturating_mul(seconds_crossed.min(u32::MAX as u64) as u32)).await;
            }
        }
        self.current_time = started_at + TimeDelta::milliseconds(total_ms as i64);

        if !events.is_empty() || !snapshots.is_empty() {
            self.save_data_chunk(output_path, &events, &snapshots, duration_seconds)?;
            chunks_written += 1;
        }

        let summary = SimulationSummary {
            seed: self.seed,
            simulated_seconds: duration_seconds,
            started_at,
            finished_at: self.current_time,
            tracker_ticks,
            events_generated,
            snapshots_generated,
            chunks_written,
            final_stats: self.tracker.stats(),
            final_board: self.tracker.events().cloned().collect(),
        };
        fs::write(
            output_path.join("summary.json"),
            serde_json::to_string_pretty(&summary)?,
        )?;

        info!(
            events = events_generated,
            snapshots = snapshots_generated,
            chunks = chunks_written,
            "Simulation completed, data saved to {}",
            output_path.display()
        );
        Ok(summary)
    }

    fn save_data_chunk(
        &self,
        output_path: &Path,
        events: &[TrackingEvent],
        snapshots: &[RealtimeSnapshot],
        chunk_id: u64,
    ) -> Result<()> {
        if !events.is_empty() {
            fs::write(
                output_path.join(format!("tracking_events_{}.json", chunk_id)),
                serde_json::to_string_pretty(events)?,
            )?;
        }

        if !snapshots.is_empty() {
            fs::write(
                output_path.join(format!("dashboard_snapshots_{}.json", chunk_id)),
                serde_json::to_string_pretty(snapshots)?,
            )?;
        }
        Ok(())
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
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut simulator = StockSimulator::new(
        TrackingConfig::default(),
        DashboardConfig::default(),
        args.seed,
        Utc::now(),
    )?;
    simulator
        .run_simulation(
            args.duration,
            args.chunk_secs,
            Duration::from_millis(args.pace_ms),
            &args.output,
        )
        .await?;
    Ok(())
}
