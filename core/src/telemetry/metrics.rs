use std::sync::Mutex;

/// Counts fetch outcomes across a process lifetime.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Clone, Copy, Default)]
pub struct Metrics {
    pub live: usize,
    pub fallback: usize,
    pub transport_errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_live(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.live += 1;
        }
    }

    pub fn record_fallback(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.fallback += 1;
        }
    }

    pub fn record_transport_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.transport_errors += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let recorder = MetricsRecorder::new();
        recorder.record_live();
        recorder.record_live();
        recorder.record_fallback();
        recorder.record_transport_error();
        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.live, 2);
        assert_eq!(snapshot.fallback, 1);
        assert_eq!(snapshot.transport_errors, 1);
    }
}
