//! Synthetic fallback data, used whenever the upstream API is unreachable
//! or no key is configured. Plausible rather than accurate: a smooth
//! pseudo-random base derived from the coordinates plus a slow time swell.

use aircore::model::{Location, Measurement, Pollutants, WeatherReport};
use aircore::registry::region_for;
use chrono::Utc;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Milliseconds since the epoch, the time input for the swell term.
pub fn clock_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Base pollution level in [0.1, 1.0] for a site at a given instant.
fn pollution_level(latitude: f64, longitude: f64, now_ms: u64) -> f32 {
    let base = (latitude * longitude).sin() * 0.5 + 0.5;
    let swell = (now_ms as f64 / 60_000.0).sin() * 0.3;
    ((base + swell).clamp(0.1, 1.0)) as f32
}

fn seed_for(latitude: f64, longitude: f64, now_ms: u64) -> u64 {
    (latitude * 1e4) as i64 as u64 ^ ((longitude * 1e4) as i64 as u64).rotate_left(17) ^ now_ms
}

/// Generates a measurement for one city. `now_ms` and `seed` are explicit
/// so tests can pin both; production callers use [`measurement_now`].
pub fn measurement(
    latitude: f64,
    longitude: f64,
    name: &str,
    now_ms: u64,
    seed: u64,
) -> Measurement {
    let mut rng = StdRng::seed_from_u64(seed);
    let level = pollution_level(latitude, longitude, now_ms);

    let pm25 = level * 50.0 + rng.gen_range(0.0..10.0);
    let pollutants = Pollutants::new(
        pm25,
        pm25 * 1.5 + rng.gen_range(0.0..5.0),
        level * 40.0 + rng.gen_range(0.0..8.0),
        level * 80.0 + rng.gen_range(0.0..15.0),
        level * 20.0 + rng.gen_range(0.0..5.0),
        level * 2.0 + rng.gen_range(0.0..0.5),
        (level * 5.0).ceil() as i32,
    );

    Measurement::new(
        Location {
            latitude,
            longitude,
            name: name.to_string(),
            region: region_for(latitude, longitude).to_string(),
        },
        pollutants,
        Utc::now().to_rfc3339(),
    )
}

pub fn measurement_now(latitude: f64, longitude: f64, name: &str) -> Measurement {
    let now = clock_ms();
    measurement(latitude, longitude, name, now, seed_for(latitude, longitude, now))
}

/// Fallback weather: clear skies with plausible Iberian ranges.
pub fn weather(latitude: f64, longitude: f64, name: &str, seed: u64) -> WeatherReport {
    let mut rng = StdRng::seed_from_u64(seed);
    WeatherReport {
        latitude,
        longitude,
        name: name.to_string(),
        temperature: 15.0 + rng.gen_range(0.0..20.0),
        humidity: 40.0 + rng.gen_range(0.0..40.0),
        wind_speed: rng.gen_range(0.0..15.0),
        wind_direction: rng.gen_range(0.0..360.0),
        precipitation: rng.gen_range(0.0..5.0),
        pressure: 1000.0 + rng.gen_range(0.0..40.0),
        weather_code: 800,
        description: "Cielo despejado".into(),
        timestamp: Utc::now().to_rfc3339(),
    }
}

pub fn weather_now(latitude: f64, longitude: f64, name: &str) -> WeatherReport {
    let now = clock_ms();
    weather(latitude, longitude, name, seed_for(latitude, longitude, now))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_aqi_stays_in_generator_range() {
        for (i, city) in aircore::registry::SPAIN_CITIES.iter().enumerate() {
            let m = measurement(city.latitude, city.longitude, city.name, 1234, i as u64);
            assert!(
                (1..=5).contains(&m.pollutants.aqi),
                "{} produced aqi {}",
                city.name,
                m.pollutants.aqi
            );
        }
    }

    #[test]
    fn fixed_seed_and_clock_replay_exactly() {
        let a = measurement(40.4168, -3.7038, "Madrid", 42_000, 7);
        let b = measurement(40.4168, -3.7038, "Madrid", 42_000, 7);
        assert_eq!(a.pollutants, b.pollutants);
        assert_eq!(a.location.region, "Madrid");
    }

    #[test]
    fn concentrations_are_never_negative() {
        let m = measurement(28.1235, -15.4363, "Las Palmas", 0, 99);
        let p = m.pollutants;
        for value in [p.pm25, p.pm10, p.no2, p.o3, p.so2, p.co] {
            assert!(value >= 0.0);
        }
    }

    #[test]
    fn synthetic_weather_is_plausible() {
        let w = weather(39.4699, -0.3763, "Valencia", 5);
        assert!((15.0..35.0).contains(&w.temperature));
        assert!((1000.0..1040.0).contains(&w.pressure));
        assert_eq!(w.weather_code, 800);
    }
}
