use crate::bridge::snapshot::{SharedSnapshot, SnapshotModel};
use crate::upstream::client::AirQualityClient;
use crate::workflow::refresh::RefreshRunner;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

fn bridge_bind_address(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    lat: f64,
    lon: f64,
    #[serde(default)]
    name: Option<String>,
}

/// Local HTTP bridge the visualizer polls.
///
/// `GET /snapshot` returns the latest cycle, `POST /refresh` requests a new
/// one (coalesced if a cycle is in flight), `GET /weather` fetches current
/// conditions for one site on demand.
pub struct GuiBridge {
    state: SharedSnapshot,
}

impl GuiBridge {
    pub fn new(
        state: SharedSnapshot,
        runner: Arc<RefreshRunner>,
        client: Arc<AirQualityClient>,
        port: u16,
    ) -> Self {
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());
        let client_filter = warp::any().map(move || client.clone());

        let snapshot_route = warp::path("snapshot")
            .and(warp::get())
            .and(state_filter)
            .map(|state: SharedSnapshot| {
                let model: SnapshotModel = state
                    .read()
                    .map(|guard| guard.clone())
                    .unwrap_or_default();
                warp::reply::json(&model)
            });

        let refresh_route = warp::path("refresh")
            .and(warp::post())
            .and(runner_filter)
            .and_then(|runner: Arc<RefreshRunner>| async move {
                let started = runner.run_cycle().await;
                Ok::<_, warp::Rejection>(warp::reply::json(&json!({
                    "status": "ok",
                    "started": started,
                })))
            });

        let weather_route = warp::path("weather")
            .and(warp::get())
            .and(warp::query::<WeatherQuery>())
            .and(client_filter)
            .and_then(|query: WeatherQuery, client: Arc<AirQualityClient>| async move {
                let name = query.name.as_deref().unwrap_or("sitio");
                let report = client.weather(query.lat, query.lon, name).await;
                Ok::<_, warp::Rejection>(warp::reply::json(&report))
            });

        let routes = snapshot_route.or(refresh_route).or(weather_route);
        tokio::spawn(async move {
            warp::serve(routes).run(bridge_bind_address(port)).await;
        });

        Self { state }
    }

    #[cfg(test)]
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
    use aircore::telemetry::MetricsRecorder;

    #[tokio::test]
    async fn bridge_reflects_published_state() {
        let config = CollectorConfig {
            api_key: None,
            batch_pause_ms: 0,
            retry_delay_ms: 1,
            bridge_port: 19411,
            ..CollectorConfig::default()
        };
        let state = shared_snapshot();
        let client = Arc::new(AirQualityClient::new(
            config.clone(),
            Arc::new(MetricsRecorder::new()),
        ));
        let runner = Arc::new(RefreshRunner::new(client.clone(), state.clone()));
        let bridge = GuiBridge::new(state.clone(), runner, client, config.bridge_port);

        let model = SnapshotModel {
            demo_mode: true,
            last_update: Some("2026-08-29T10:00:00Z".into()),
            ..SnapshotModel::default()
        };
        *state.write().unwrap() = model;
        let snapshot = bridge.snapshot();
        assert!(snapshot.demo_mode);
        assert_eq!(snapshot.last_update.as_deref(), Some("2026-08-29T10:00:00Z"));
    }
}
