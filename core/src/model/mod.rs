pub mod measurement;
pub mod weather;

pub use measurement::{Location, Measurement, Pollutants};
pub use weather::WeatherReport;
