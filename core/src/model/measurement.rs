use crate::quality::QualityLevel;
use serde::{Deserialize, Serialize};

/// Geographic placement of a measurement site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub region: String,
}

/// Pollutant concentrations in µg/m³ (CO in mg/m³) plus the coarse AQI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Pollutants {
    pub pm25: f32,
    pub pm10: f32,
    pub no2: f32,
    pub o3: f32,
    pub so2: f32,
    pub co: f32,
    pub aqi: i32,
}

impl Pollutants {
    /// Builds a pollutant record, clamping negative concentrations to zero.
    /// The AQI passes through unclamped; classification handles the range.
    pub fn new(pm25: f32, pm10: f32, no2: f32, o3: f32, so2: f32, co: f32, aqi: i32) -> Self {
        Self {
            pm25: pm25.max(0.0),
            pm10: pm10.max(0.0),
            no2: no2.max(0.0),
            o3: o3.max(0.0),
            so2: so2.max(0.0),
            co: co.max(0.0),
            aqi,
        }
    }
}

/// One air-quality reading for one city, immutable once built.
///
/// `quality` is always derived from `pollutants.aqi`; the only constructor
/// enforces that invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub location: Location,
    pub pollutants: Pollutants,
    pub timestamp: String,
    pub quality: QualityLevel,
}

impl Measurement {
    pub fn new(location: Location, pollutants: Pollutants, timestamp: String) -> Self {
        let quality = QualityLevel::from_aqi(pollutants.aqi);
        Self {
            location,
            pollutants,
            timestamp,
            quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn madrid() -> Location {
        Location {
            latitude: 40.4168,
            longitude: -3.7038,
            name: "Madrid".into(),
            region: "Madrid".into(),
        }
    }

    #[test]
    fn quality_is_derived_from_aqi() {
        let m = Measurement::new(
            madrid(),
            Pollutants::new(42.0, 60.0, 30.0, 70.0, 10.0, 0.8, 4),
            "2026-08-29T10:00:00Z".into(),
        );
        assert_eq!(m.quality, QualityLevel::Poor);
    }

    #[test]
    fn negative_concentrations_clamp_to_zero() {
        let p = Pollutants::new(-1.0, -0.5, 3.0, -2.0, 0.0, -0.1, 2);
        assert_eq!(p.pm25, 0.0);
        assert_eq!(p.pm10, 0.0);
        assert_eq!(p.no2, 3.0);
        assert_eq!(p.o3, 0.0);
        assert_eq!(p.co, 0.0);
    }

    #[test]
    fn measurement_round_trips_snapshot_wire_format() {
        let m = Measurement::new(
            madrid(),
            Pollutants::new(12.0, 18.0, 22.0, 55.0, 4.0, 0.4, 2),
            "2026-08-29T10:00:00Z".into(),
        );
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"quality\":\"good\""));
        let back: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(back.location.name, "Madrid");
        assert_eq!(back.quality, QualityLevel::Good);
    }
}
