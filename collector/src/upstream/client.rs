use crate::upstream::synthetic;
use crate::upstream::wire::{PollutionResponse, WeatherResponse};
use crate::workflow::config::CollectorConfig;
use aircore::model::{Location, Measurement, Pollutants, WeatherReport};
use aircore::registry::{region_for, SPAIN_CITIES};
use aircore::telemetry::MetricsRecorder;
use aircore::{FetchError, FetchResult};
use chrono::Utc;
use log::warn;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::time::sleep;

/// Per-cycle outcome of a registry-wide fetch.
pub struct FetchSummary {
    pub measurements: Vec<Measurement>,
    pub fallback_count: usize,
}

/// Upstream client with retry and synthetic fallback.
///
/// Explicitly constructed and injected wherever it is used; holds its own
/// configuration instead of living in a process-wide singleton.
pub struct AirQualityClient {
    http: reqwest::Client,
    config: CollectorConfig,
    metrics: Arc<MetricsRecorder>,
}

impl AirQualityClient {
    pub fn new(config: CollectorConfig, metrics: Arc<MetricsRecorder>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            metrics,
        }
    }

    /// Air-quality reading for one city. Never fails: after the retry
    /// budget is spent the synthetic generator stands in.
    pub async fn air_quality(&self, latitude: f64, longitude: f64, name: &str) -> Measurement {
        match self.fetch_air_quality(latitude, longitude, name).await {
            Ok(measurement) => {
                self.metrics.record_live();
                measurement
            }
            Err(err) => {
                warn!("live data unavailable for {} ({}), using synthetic", name, err);
                self.metrics.record_fallback();
                synthetic::measurement_now(latitude, longitude, name)
            }
        }
    }

    /// Weather for one site, with the same degrade-to-synthetic policy.
    pub async fn weather(&self, latitude: f64, longitude: f64, name: &str) -> WeatherReport {
        match self.fetch_weather(latitude, longitude, name).await {
            Ok(report) => {
                self.metrics.record_live();
                report
            }
            Err(err) => {
                warn!("weather unavailable for {} ({}), using synthetic", name, err);
                self.metrics.record_fallback();
                synthetic::weather_now(latitude, longitude, name)
            }
        }
    }

    /// Fetches the whole registry in small concurrent batches with a pause
    /// between batches to respect upstream rate limits. One city's failure
    /// never disturbs the others; the result always covers every city.
    pub async fn fetch_all(self: &Arc<Self>) -> FetchSummary {
        let mut measurements = Vec::with_capacity(SPAIN_CITIES.len());
        let mut fallback_count = 0;

        for (batch_index, batch) in SPAIN_CITIES.chunks(self.config.batch_size.max(1)).enumerate()
        {
            if batch_index > 0 && self.config.batch_pause_ms > 0 {
                sleep(std::time::Duration::from_millis(self.config.batch_pause_ms)).await;
            }

            let handles: Vec<_> = batch
                .iter()
                .map(|city| {
                    let client = Arc::clone(self);
                    let city = *city;
                    tokio::spawn(async move {
                        client
                            .fetch_air_quality(city.latitude, city.longitude, city.name)
                            .await
                    })
                })
                .collect();

            for (handle, city) in handles.into_iter().zip(batch) {
                match handle.await {
                    Ok(Ok(measurement)) => {
                        self.metrics.record_live();
                        measurements.push(measurement);
                    }
                    Ok(Err(err)) => {
                        warn!("live data unavailable for {} ({}), using synthetic", city.name, err);
                        self.metrics.record_fallback();
                        fallback_count += 1;
                        measurements.push(synthetic::measurement_now(
                            city.latitude,
                            city.longitude,
                            city.name,
                        ));
                    }
                    Err(join_err) => {
                        warn!("fetch task for {} aborted ({}), using synthetic", city.name, join_err);
                        self.metrics.record_fallback();
                        fallback_count += 1;
                        measurements.push(synthetic::measurement_now(
                            city.latitude,
                            city.longitude,
                            city.name,
                        ));
                    }
                }
            }
        }

        FetchSummary {
            measurements,
            fallback_count,
        }
    }

    async fn fetch_air_quality(
        &self,
        latitude: f64,
        longitude: f64,
        name: &str,
    ) -> FetchResult<Measurement> {
        let response: PollutionResponse = self
            .get_with_retry("air_pollution", latitude, longitude, &[])
            .await?;
        let entry = response
            .list
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::MalformedResponse("empty pollution list".into()))?;

        let c = entry.components;
        Ok(Measurement::new(
            Location {
                latitude,
                longitude,
                name: name.to_string(),
                region: region_for(latitude, longitude).to_string(),
            },
            Pollutants::new(c.pm25, c.pm10, c.no2, c.o3, c.so2, c.co, entry.main.aqi),
            Utc::now().to_rfc3339(),
        ))
    }

    async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
        name: &str,
    ) -> FetchResult<WeatherReport> {
        let response: WeatherResponse = self
            .get_with_retry("weather", latitude, longitude, &[("units", "metric")])
            .await?;
        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::MalformedResponse("empty weather list".into()))?;

        Ok(WeatherReport {
            latitude,
            longitude,
            name: name.to_string(),
            temperature: response.main.temp,
            humidity: response.main.humidity,
            wind_speed: response.wind.speed,
            wind_direction: response.wind.deg,
            precipitation: response.rain.map(|r| r.one_hour).unwrap_or(0.0),
            pressure: response.main.pressure,
            weather_code: condition.id,
            description: condition.description,
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    /// One GET with the configured retry budget and linear backoff.
    async fn get_with_retry<T: DeserializeOwned>(
        &self,
        path: &str,
        latitude: f64,
        longitude: f64,
        extra: &[(&str, &str)],
    ) -> FetchResult<T> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| FetchError::MissingApiKey(format!("no key for {}", path)))?;

        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let mut attempt = 1;
        loop {
            match self.get_once(&url, latitude, longitude, api_key, extra).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.config.retry_attempts => {
                    warn!("{} attempt {} failed: {}", path, attempt, err);
                    sleep(self.config.retry_delay(attempt)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        url: &str,
        latitude: f64,
        longitude: f64,
        api_key: &str,
        extra: &[(&str, &str)],
    ) -> FetchResult<T> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();
        let mut query: Vec<(&str, &str)> =
            vec![("lat", lat.as_str()), ("lon", lon.as_str()), ("appid", api_key)];
        query.extend_from_slice(extra);

        let response = self
            .http
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|err| {
                self.metrics.record_transport_error();
                FetchError::Transport(err.to_string())
            })?;

        if !response.status().is_success() {
            self.metrics.record_transport_error();
            return Err(FetchError::Transport(format!(
                "upstream returned {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| FetchError::MalformedResponse(err.to_string()))
    }
}
