use crate::bridge::snapshot::{SharedSnapshot, SnapshotModel};
use crate::upstream::client::AirQualityClient;
use aircore::stats::AggregateStats;
use aircore::telemetry::LogManager;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Drives refresh cycles: Idle -> Fetching -> {Success | PartialFailure} -> Idle.
///
/// Cycles are serialized: a trigger that arrives while one is in flight is
/// skipped rather than racing it, so a late timer can never overwrite a
/// newer manual refresh.
pub struct RefreshRunner {
    client: Arc<AirQualityClient>,
    state: SharedSnapshot,
    in_flight: Mutex<()>,
    logger: LogManager,
}

impl RefreshRunner {
    pub fn new(client: Arc<AirQualityClient>, state: SharedSnapshot) -> Self {
        Self {
            client,
            state,
            in_flight: Mutex::new(()),
            logger: LogManager::new(),
        }
    }

    /// Runs one cycle and publishes the result. Returns false when a cycle
    /// was already in flight and this trigger was coalesced away.
    pub async fn run_cycle(&self) -> bool {
        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                self.logger.record("refresh already in flight, skipping trigger");
                return false;
            }
        };

        let summary = self.client.fetch_all().await;
        let stats = AggregateStats::from_measurements(&summary.measurements);
        let demo_mode = summary.fallback_count > 0;
        self.logger.record(&format!(
            "refresh cycle complete: {} cities, {} synthetic",
            summary.measurements.len(),
            summary.fallback_count
        ));

        let model = SnapshotModel {
            measurements: summary.measurements,
            stats,
            demo_mode,
            last_update: Some(Utc::now().to_rfc3339()),
        };
        if let Ok(mut guard) = self.state.write() {
            *guard = model;
        }
        true
    }

    pub fn snapshot(&self) -> SnapshotModel {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::snapshot::shared_snapshot;
    use crate::workflow::config::CollectorConfig;
    use aircore::registry::SPAIN_CITIES;
    use aircore::telemetry::MetricsRecorder;

    fn offline_runner() -> RefreshRunner {
        let config = CollectorConfig {
            api_key: None,
            batch_pause_ms: 0,
            retry_delay_ms: 1,
            ..CollectorConfig::default()
        };
        let client = Arc::new(AirQualityClient::new(config, Arc::new(MetricsRecorder::new())));
        RefreshRunner::new(client, shared_snapshot())
    }

    #[tokio::test]
    async fn cycle_publishes_a_complete_snapshot() {
        let runner = offline_runner();
        assert!(runner.run_cycle().await);
        let snapshot = runner.snapshot();
        assert_eq!(snapshot.measurements.len(), SPAIN_CITIES.len());
        assert!(snapshot.demo_mode);
        assert!(snapshot.last_update.is_some());
        assert!(snapshot.stats.worst_city.is_some());
    }

    #[tokio::test]
    async fn second_cycle_overwrites_the_first() {
        let runner = offline_runner();
        runner.run_cycle().await;
        let first = runner.snapshot().last_update;
        runner.run_cycle().await;
        let second = runner.snapshot().last_update;
        assert!(second >= first);
        assert_eq!(runner.snapshot().measurements.len(), SPAIN_CITIES.len());
    }
}
