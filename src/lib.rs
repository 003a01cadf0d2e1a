//! `skywatch` - extreme-weather monitoring and chat alerting
//!
//! This library provides the core functionality for polling a weather
//! provider, evaluating threshold rules over current conditions, air quality
//! and the short-term forecast, and pushing deduplicated alert messages to a
//! chat channel. It is designed as a periodic batch job driven by an external
//! scheduler.

pub mod alerts;
pub mod config;
pub mod error;
pub mod models;
pub mod monitor;
pub mod provider;

// Re-export core types for public API
pub use alerts::Notifier;
pub use config::{AlertThresholds, SkywatchConfig};
pub use error::{FetchError, SkywatchError};
pub use models::{AirQualitySample, ForecastSeries, WeatherObservation};
pub use monitor::Monitor;
pub use provider::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkywatchError>;
