use anyhow::Context;
use bridge::server::GuiBridge;
use bridge::snapshot::shared_snapshot;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use upstream::client::AirQualityClient;
use workflow::config::CollectorConfig;
use workflow::refresh::RefreshRunner;

mod bridge;
mod upstream;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Air-quality collector for the Spain skyline visualizer")]
struct Args {
    /// Run one synthetic-only cycle and print a summary (no network)
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load collector settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Keep the GUI bridge and refresh timer alive until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = &args.config {
        CollectorConfig::load(path)?
    } else {
        CollectorConfig::from_env()
    };
    if args.offline {
        // No key means every city degrades to the synthetic generator.
        config.api_key = None;
    }

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating collector runtime")?;
    runtime.block_on(run(args, config))
}

async fn run(args: Args, config: CollectorConfig) -> anyhow::Result<()> {
    let metrics = Arc::new(aircore::telemetry::MetricsRecorder::new());
    let client = Arc::new(AirQualityClient::new(config.clone(), metrics.clone()));
    let state = shared_snapshot();
    let runner = Arc::new(RefreshRunner::new(client.clone(), state.clone()));

    runner.run_cycle().await;
    let snapshot = runner.snapshot();
    println!(
        "Cycle complete -> {} cities, avg AQI {:.1}, worst {}, demo mode {}",
        snapshot.measurements.len(),
        snapshot.stats.avg_aqi,
        snapshot.stats.worst_city.as_deref().unwrap_or("n/a"),
        snapshot.demo_mode
    );

    if args.serve {
        let _bridge = GuiBridge::new(state, runner.clone(), client, config.bridge_port);
        info!(
            "bridge listening on 127.0.0.1:{}, refreshing every {}s",
            config.bridge_port, config.refresh_interval_secs
        );

        let mut ticker =
            tokio::time::interval(Duration::from_secs(config.refresh_interval_secs.max(1)));
        ticker.tick().await; // the first tick fires immediately
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    runner.run_cycle().await;
                }
                result = signal::ctrl_c() => {
                    result.context("awaiting Ctrl+C to exit")?;
                    break;
                }
            }
        }
    }

    let counts = metrics.snapshot();
    info!(
        "session totals: {} live, {} synthetic, {} transport errors",
        counts.live, counts.fallback, counts.transport_errors
    );
    Ok(())
}
