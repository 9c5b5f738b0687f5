use serde::{Deserialize, Serialize};

/// Current weather conditions for a measurement site.
///
/// Shown alongside the air-quality panel; never feeds the scene derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub temperature: f32,
    pub humidity: f32,
    pub wind_speed: f32,
    pub wind_direction: f32,
    pub precipitation: f32,
    pub pressure: f32,
    pub weather_code: u32,
    pub description: String,
    pub timestamp: String,
}
