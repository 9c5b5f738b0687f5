use crate::model::Measurement;
use crate::quality::QualityLevel;
use serde::{Deserialize, Serialize};

/// Tower height in scene units for a city's dominant skyscraper.
pub fn tower_height(aqi: i32, pm25: f32) -> f32 {
    let raw = 0.5 + aqi as f32 * 0.3 + (pm25 / 100.0) * 0.5;
    raw.clamp(0.5, 3.0)
}

/// Material opacity for a city's buildings.
pub fn opacity(aqi: i32) -> f32 {
    (0.4 + (aqi as f32 / 5.0) * 0.6).clamp(0.3, 1.0)
}

/// Number of buildings in a city cluster. Stepwise in AQI, never zero.
pub fn building_count(aqi: i32) -> usize {
    match aqi {
        i32::MIN..=2 => aqi.max(1) as usize,
        3 => 3,
        4 => 4,
        _ => 5,
    }
}

/// Ambient pollution particles above a cluster: linear in AQI from
/// the moderate threshold upward, none below it.
pub fn particle_count(aqi: i32) -> usize {
    if aqi >= 3 {
        (aqi as usize) * 20
    } else {
        0
    }
}

/// Smoke puffs rising from rooftops, gated like [`particle_count`].
pub fn smoke_count(aqi: i32) -> usize {
    if aqi >= 3 {
        (aqi as usize) * 10
    } else {
        0
    }
}

/// Phase offset so the skyline animation sweeps northwest to southeast.
pub fn animation_delay(latitude: f64, longitude: f64) -> f32 {
    let norm_lat = (latitude - 35.0) / 8.0;
    let norm_lon = (longitude + 10.0) / 10.0;
    ((norm_lat + norm_lon) * 2.0) as f32
}

/// Complete visual description of one city, recomputed per render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneParameters {
    pub height: f32,
    pub opacity: f32,
    pub building_count: usize,
    pub particle_count: usize,
    pub smoke_count: usize,
    pub color: String,
    pub animation_delay: f32,
}

impl SceneParameters {
    pub fn derive(measurement: &Measurement) -> Self {
        let aqi = measurement.pollutants.aqi;
        Self {
            height: tower_height(aqi, measurement.pollutants.pm25),
            opacity: opacity(aqi),
            building_count: building_count(aqi),
            particle_count: particle_count(aqi),
            smoke_count: smoke_count(aqi),
            color: QualityLevel::from_aqi(aqi).color().to_string(),
            animation_delay: animation_delay(
                measurement.location.latitude,
                measurement.location.longitude,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, Pollutants};

    #[test]
    fn tower_height_stays_in_band() {
        for aqi in 1..=6 {
            for pm25 in [0.0_f32, 12.5, 55.0, 180.0, 500.0] {
                let h = tower_height(aqi, pm25);
                assert!((0.5..=3.0).contains(&h), "aqi {} pm25 {} -> {}", aqi, pm25, h);
            }
        }
    }

    #[test]
    fn tower_height_exact_at_clean_air() {
        assert_eq!(tower_height(1, 0.0), 0.8);
    }

    #[test]
    fn opacity_band_and_monotonicity() {
        let mut previous = 0.0;
        for aqi in 1..=6 {
            let o = opacity(aqi);
            assert!((0.3..=1.0).contains(&o));
            assert!(o >= previous);
            previous = o;
        }
    }

    #[test]
    fn building_count_steps() {
        assert_eq!(building_count(1), 1);
        assert_eq!(building_count(2), 2);
        assert_eq!(building_count(3), 3);
        assert_eq!(building_count(4), 4);
        assert_eq!(building_count(5), 5);
        assert_eq!(building_count(9), 5);
        let counts: Vec<usize> = (1..=6).map(building_count).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn building_count_never_zero() {
        assert_eq!(building_count(0), 1);
        assert_eq!(building_count(-4), 1);
    }

    #[test]
    fn particles_gate_at_moderate() {
        assert_eq!(particle_count(1), 0);
        assert_eq!(particle_count(2), 0);
        assert_eq!(particle_count(3), 60);
        assert_eq!(particle_count(5), 100);
        assert_eq!(smoke_count(2), 0);
        assert_eq!(smoke_count(4), 40);
    }

    #[test]
    fn derive_combines_all_parameters() {
        let m = Measurement::new(
            Location {
                latitude: 40.4168,
                longitude: -3.7038,
                name: "Madrid".into(),
                region: "Madrid".into(),
            },
            Pollutants::new(40.0, 60.0, 30.0, 70.0, 10.0, 0.8, 5),
            "2026-08-29T10:00:00Z".into(),
        );
        let p = SceneParameters::derive(&m);
        assert_eq!(p.building_count, 5);
        assert_eq!(p.particle_count, 100);
        assert_eq!(p.color, QualityLevel::VeryPoor.color());
        assert_eq!(p.height, tower_height(5, 40.0));
    }
}
