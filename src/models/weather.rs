//! Weather observation model and display methods

use serde::{Deserialize, Serialize};

/// Forecast entries evaluated per run: 16 entries at 3-hour resolution
/// cover roughly the next two days.
pub const EVALUATION_WINDOW: usize = 16;

/// One weather snapshot, either the current conditions or a single
/// forecast entry. Built fresh from a provider payload per fetch and
/// discarded after evaluation; missing provider fields arrive here as
/// zero/empty rather than failing the decode.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherObservation {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Provider condition code (200s thunderstorm, 500s rain, 600s snow, ...)
    pub condition_id: u32,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Provider timestamp text, empty for current conditions
    pub timestamp: String,
}

impl WeatherObservation {
    /// One-line summary for the run log
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} (ID:{}) {:.1}°C, wind {:.1} m/s",
            self.description, self.condition_id, self.temperature, self.wind_speed
        )
    }
}

/// Ordered forecast series as returned by the provider
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ForecastSeries {
    /// Forecast entries, 3-hour resolution, ordered by timestamp
    pub entries: Vec<WeatherObservation>,
}

impl ForecastSeries {
    /// The slice of entries considered for evaluation
    #[must_use]
    pub fn window(&self) -> &[WeatherObservation] {
        let end = self.entries.len().min(EVALUATION_WINDOW);
        &self.entries[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(timestamp: &str) -> WeatherObservation {
        WeatherObservation {
            temperature: 21.3,
            wind_speed: 4.2,
            condition_id: 800,
            description: "clear sky".to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_summary_line() {
        let summary = observation("").summary();
        assert!(summary.contains("clear sky"));
        assert!(summary.contains("ID:800"));
        assert!(summary.contains("21.3°C"));
    }

    #[test]
    fn test_window_clamps_to_sixteen_entries() {
        let series = ForecastSeries {
            entries: (0..40).map(|i| observation(&format!("t{i}"))).collect(),
        };
        assert_eq!(series.window().len(), EVALUATION_WINDOW);
        assert_eq!(series.window()[0].timestamp, "t0");
    }

    #[test]
    fn test_window_with_short_series() {
        let series = ForecastSeries {
            entries: vec![observation("t0"), observation("t1")],
        };
        assert_eq!(series.window().len(), 2);
        assert!(ForecastSeries::default().window().is_empty());
    }
}
