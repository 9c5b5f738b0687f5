//! OpenWeatherMap response shapes, reduced to the fields we consume.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PollutionResponse {
    pub list: Vec<PollutionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PollutionEntry {
    pub main: PollutionIndex,
    pub components: PollutionComponents,
}

#[derive(Debug, Deserialize)]
pub struct PollutionIndex {
    pub aqi: i32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PollutionComponents {
    #[serde(rename = "pm2_5")]
    pub pm25: f32,
    pub pm10: f32,
    pub no2: f32,
    pub o3: f32,
    pub so2: f32,
    pub co: f32,
}

#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    pub main: WeatherMain,
    pub wind: WeatherWind,
    #[serde(default)]
    pub rain: Option<WeatherRain>,
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherMain {
    pub temp: f32,
    pub humidity: f32,
    pub pressure: f32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct WeatherWind {
    pub speed: f32,
    pub deg: f32,
}

#[derive(Debug, Deserialize, Default)]
pub struct WeatherRain {
    #[serde(rename = "1h", default)]
    pub one_hour: f32,
}

#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    pub id: u32,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pollution_payload_parses_with_renamed_fields() {
        let raw = r#"{
            "coord": {"lon": -3.7038, "lat": 40.4168},
            "list": [{
                "main": {"aqi": 3},
                "components": {"co": 230.3, "no": 0.2, "no2": 14.1, "o3": 68.7,
                               "so2": 1.8, "pm2_5": 9.4, "pm10": 12.3, "nh3": 0.9},
                "dt": 1756454400
            }]
        }"#;
        let parsed: PollutionResponse = serde_json::from_str(raw).unwrap();
        let entry = &parsed.list[0];
        assert_eq!(entry.main.aqi, 3);
        assert_eq!(entry.components.pm25, 9.4);
        assert_eq!(entry.components.pm10, 12.3);
    }

    #[test]
    fn weather_payload_parses_without_rain_block() {
        let raw = r#"{
            "weather": [{"id": 800, "main": "Clear", "description": "cielo claro", "icon": "01d"}],
            "main": {"temp": 24.3, "feels_like": 24.0, "pressure": 1018, "humidity": 38},
            "wind": {"speed": 3.6, "deg": 220}
        }"#;
        let parsed: WeatherResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.weather[0].id, 800);
        assert!(parsed.rain.is_none());
        assert_eq!(parsed.main.pressure, 1018.0);
    }
}
