//! Data models for the skywatch application
//!
//! This module contains the core domain models organized by concern:
//! - Weather: a single observed or forecast weather snapshot
//! - Forecast: the ordered series of forecast snapshots
//! - Air quality: a PM2.5 reading with on-demand AQI derivation

pub mod air_quality;
pub mod weather;

// Re-export all public types for convenient access
pub use air_quality::AirQualitySample;
pub use weather::{ForecastSeries, WeatherObservation};
