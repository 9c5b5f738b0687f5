//! Convenience re-exports for downstream crates.

pub use crate::model::{Location, Measurement, Pollutants, WeatherReport};
pub use crate::quality::QualityLevel;
pub use crate::registry::{region_for, City, SPAIN_CITIES};
pub use crate::scene::{
    cluster_layout, BuildingSpec, GeoProjection, JitterSource, NoJitter, SceneParameters,
    SeededJitter,
};
pub use crate::stats::AggregateStats;
pub use crate::{FetchError, FetchResult};
