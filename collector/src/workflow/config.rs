use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Collector tuning. Everything except the API key ships with compiled-in
/// defaults; a YAML overlay can adjust the knobs for testing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Upstream credential; `None` forces synthetic data for every city.
    pub api_key: Option<String>,
    pub base_url: String,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub batch_size: usize,
    pub batch_pause_ms: u64,
    pub refresh_interval_secs: u64,
    pub bridge_port: u16,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openweathermap.org/data/2.5".into(),
            retry_attempts: 3,
            retry_delay_ms: 1000,
            batch_size: 3,
            batch_pause_ms: 1000,
            refresh_interval_secs: 300,
            bridge_port: 9400,
        }
    }
}

impl CollectorConfig {
    /// Defaults plus the API key from the environment, if set and non-empty.
    pub fn from_env() -> Self {
        Self::default().with_env_api_key()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading collector config {}", path_ref.display()))?;
        let config: CollectorConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing collector config {}", path_ref.display()))?;
        Ok(config.with_env_api_key())
    }

    fn with_env_api_key(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        self
    }

    /// Linear backoff before the given retry attempt (1-based).
    pub fn retry_delay(&self, attempt: u32) -> std::time::Duration {
        std::time::Duration::from_millis(self.retry_delay_ms * attempt as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_the_published_policy() {
        let config = CollectorConfig::default();
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.refresh_interval_secs, 300);
        assert_eq!(config.retry_delay(2), std::time::Duration::from_millis(2000));
    }

    #[test]
    fn config_load_reads_yaml_overrides() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"retry_delay_ms: 10\nbatch_pause_ms: 0\nbatch_size: 5\n")
            .unwrap();
        let path = temp.into_temp_path();
        let config = CollectorConfig::load(&path).unwrap();
        assert_eq!(config.retry_delay_ms, 10);
        assert_eq!(config.batch_size, 5);
        // Untouched knobs keep their defaults.
        assert_eq!(config.retry_attempts, 3);
    }
}
