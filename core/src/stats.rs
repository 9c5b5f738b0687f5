use crate::model::Measurement;
use serde::{Deserialize, Serialize};

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Headline statistics over one refresh cycle, shown in the summary panel.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AggregateStats {
    pub avg_aqi: f32,
    pub avg_pm25: f32,
    pub min_pm25: f32,
    pub max_pm25: f32,
    pub worst_city: Option<String>,
    pub best_city: Option<String>,
}

impl AggregateStats {
    pub fn from_measurements(measurements: &[Measurement]) -> Self {
        if measurements.is_empty() {
            return Self::default();
        }

        let count = measurements.len() as f32;
        let aqi_sum: i32 = measurements.iter().map(|m| m.pollutants.aqi).sum();
        let pm25_sum: f32 = measurements.iter().map(|m| m.pollutants.pm25).sum();
        let min_pm25 = measurements
            .iter()
            .map(|m| m.pollutants.pm25)
            .fold(f32::INFINITY, f32::min);
        let max_pm25 = measurements
            .iter()
            .map(|m| m.pollutants.pm25)
            .fold(f32::NEG_INFINITY, f32::max);

        let worst = measurements
            .iter()
            .max_by_key(|m| m.pollutants.aqi)
            .map(|m| m.location.name.clone());
        let best = measurements
            .iter()
            .min_by_key(|m| m.pollutants.aqi)
            .map(|m| m.location.name.clone());

        Self {
            avg_aqi: round1(aqi_sum as f32 / count),
            avg_pm25: round1(pm25_sum / count),
            min_pm25: round1(min_pm25),
            max_pm25: round1(max_pm25),
            worst_city: worst,
            best_city: best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, Pollutants};

    fn sample(name: &str, aqi: i32, pm25: f32) -> Measurement {
        Measurement::new(
            Location {
                latitude: 40.0,
                longitude: -3.0,
                name: name.into(),
                region: "España".into(),
            },
            Pollutants::new(pm25, pm25 * 1.5, 10.0, 20.0, 5.0, 0.3, aqi),
            "2026-08-29T10:00:00Z".into(),
        )
    }

    #[test]
    fn empty_input_yields_zeroed_stats() {
        let stats = AggregateStats::from_measurements(&[]);
        assert_eq!(stats, AggregateStats::default());
        assert!(stats.worst_city.is_none());
    }

    #[test]
    fn extremes_name_the_right_cities() {
        let data = vec![
            sample("Madrid", 4, 41.2),
            sample("Oviedo", 1, 6.4),
            sample("Sevilla", 3, 22.9),
        ];
        let stats = AggregateStats::from_measurements(&data);
        assert_eq!(stats.worst_city.as_deref(), Some("Madrid"));
        assert_eq!(stats.best_city.as_deref(), Some("Oviedo"));
        assert_eq!(stats.max_pm25, 41.2);
        assert_eq!(stats.min_pm25, 6.4);
        assert_eq!(stats.avg_aqi, 2.7);
    }
}
