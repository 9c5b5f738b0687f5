//! Data model and scene-derivation core for the Spain air-quality skyline.
//!
//! The modules mirror the measurement-to-scene pipeline: a fetched
//! [`model::Measurement`] is classified into a [`quality::QualityLevel`],
//! expanded into [`scene::SceneParameters`], and placed on the stage by
//! [`scene::GeoProjection`]. Everything here is pure; all I/O lives in the
//! collector service.

pub mod model;
pub mod prelude;
pub mod quality;
pub mod registry;
pub mod scene;
pub mod stats;
pub mod telemetry;

/// Failure taxonomy for upstream data acquisition.
///
/// Every variant collapses to the same recovery action in the collector
/// (substitute synthetic data), but the distinction is kept for logging
/// and metrics.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("missing API key: {0}")]
    MissingApiKey(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

pub type FetchResult<T> = Result<T, FetchError>;
