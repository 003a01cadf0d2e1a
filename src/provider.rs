//! Weather provider client for OpenWeatherMap integration
//!
//! This module provides HTTP client functionality for the three read
//! endpoints: current weather, 5-day/3-hour forecast and air pollution.
//! Each call is a single bounded-timeout attempt returning a typed
//! [`FetchError`] on failure; there are no retries and no caching.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::FetchError;
use crate::models::{AirQualitySample, ForecastSeries, WeatherObservation};

/// HTTP client for the weather provider
pub struct WeatherClient {
    /// Blocking HTTP client with the configured per-call timeout
    client: reqwest::blocking::Client,
    /// Provider configuration
    config: ProviderConfig,
}

impl WeatherClient {
    /// Create a new provider client
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("skywatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Fetch the current conditions for the configured city
    pub fn current_weather(&self) -> Result<WeatherObservation, FetchError> {
        let url = format!("{}/weather", self.config.base_url);
        let payload: owm::ConditionsPayload = self.get(&url, &self.city_params())?;
        Ok(payload.to_observation())
    }

    /// Fetch the 5-day/3-hour forecast for the configured city
    pub fn forecast(&self) -> Result<ForecastSeries, FetchError> {
        let url = format!("{}/forecast", self.config.base_url);
        let payload: owm::ForecastPayload = self.get(&url, &self.city_params())?;
        Ok(payload.to_series())
    }

    /// Fetch the air-quality reading for the configured coordinates.
    ///
    /// The air-pollution endpoint keys on latitude/longitude, independent of
    /// the city id used by the weather and forecast lookups.
    pub fn air_pollution(&self) -> Result<AirQualitySample, FetchError> {
        let url = format!("{}/air_pollution", self.config.base_url);
        let params = [
            ("lat", self.config.latitude.to_string()),
            ("lon", self.config.longitude.to_string()),
            ("appid", self.config.api_key.clone()),
        ];
        let payload: owm::AirPollutionPayload = self.get(&url, &params)?;
        Ok(payload.to_sample())
    }

    fn city_params(&self) -> [(&'static str, String); 4] {
        [
            ("id", self.config.city_id.to_string()),
            ("appid", self.config.api_key.clone()),
            ("units", "metric".to_string()),
            ("lang", self.config.lang.clone()),
        ]
    }

    fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, FetchError> {
        debug!("GET {url}");
        let response = self.client.get(url).query(params).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json()
            .map_err(|err| FetchError::Transport(format!("failed to decode response: {err}")))
    }
}

/// OpenWeatherMap response structures and conversion into internal models.
///
/// Every field carries a default so an absent field decodes to zero/empty
/// instead of failing the whole payload.
pub mod owm {
    use serde::Deserialize;

    use crate::models::{AirQualitySample, ForecastSeries, WeatherObservation};

    /// One conditions record: the `/weather` response body, and equally one
    /// entry of the `/forecast` list
    #[derive(Debug, Default, Deserialize)]
    pub struct ConditionsPayload {
        #[serde(default)]
        pub main: MainReadings,
        #[serde(default)]
        pub wind: WindReadings,
        #[serde(default)]
        pub weather: Vec<ConditionTag>,
        /// Forecast timestamp text ("2024-06-01 09:00:00"); absent on `/weather`
        #[serde(default)]
        pub dt_txt: String,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct MainReadings {
        /// Temperature in °C (`units=metric`)
        #[serde(default)]
        pub temp: f64,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct WindReadings {
        /// Wind speed in m/s
        #[serde(default)]
        pub speed: f64,
    }

    /// Condition taxonomy entry; only the first one is meaningful
    #[derive(Debug, Default, Clone, Deserialize)]
    pub struct ConditionTag {
        #[serde(default)]
        pub id: u32,
        #[serde(default)]
        pub description: String,
    }

    /// The `/forecast` response body
    #[derive(Debug, Default, Deserialize)]
    pub struct ForecastPayload {
        #[serde(default)]
        pub list: Vec<ConditionsPayload>,
    }

    /// The `/air_pollution` response body
    #[derive(Debug, Default, Deserialize)]
    pub struct AirPollutionPayload {
        #[serde(default)]
        pub list: Vec<AirPollutionEntry>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct AirPollutionEntry {
        #[serde(default)]
        pub components: Components,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct Components {
        /// PM2.5 concentration in µg/m³
        #[serde(default)]
        pub pm2_5: f64,
    }

    impl ConditionsPayload {
        /// Convert into the internal observation model
        #[must_use]
        pub fn to_observation(&self) -> WeatherObservation {
            let condition = self.weather.first().cloned().unwrap_or_default();

            WeatherObservation {
                temperature: self.main.temp,
                wind_speed: self.wind.speed,
                condition_id: condition.id,
                description: condition.description,
                timestamp: self.dt_txt.clone(),
            }
        }
    }

    impl ForecastPayload {
        /// Convert into the internal forecast series, preserving order
        #[must_use]
        pub fn to_series(&self) -> ForecastSeries {
            ForecastSeries {
                entries: self.list.iter().map(ConditionsPayload::to_observation).collect(),
            }
        }
    }

    impl AirPollutionPayload {
        /// Take the first (current) reading; an empty list yields a zero sample
        #[must_use]
        pub fn to_sample(&self) -> AirQualitySample {
            let pm2_5 = self
                .list
                .first()
                .map(|entry| entry.components.pm2_5)
                .unwrap_or_default();

            AirQualitySample { pm2_5 }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::owm::*;
    use super::*;

    #[test]
    fn client_construction() {
        let client = WeatherClient::new(ProviderConfig {
            api_key: "test_key".to_string(),
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            city_id: 1_816_670,
            city_name: "Beijing".to_string(),
            latitude: 39.9042,
            longitude: 116.4074,
            lang: "en".to_string(),
            timeout_seconds: 10,
        });
        assert!(client.is_ok());
    }

    #[test]
    fn conditions_payload_decodes_provider_sample() {
        let body = r#"{
            "weather": [{"id": 502, "main": "Rain", "description": "heavy rain"}],
            "main": {"temp": 21.4, "feels_like": 22.0, "humidity": 88},
            "wind": {"speed": 6.7, "deg": 200},
            "dt_txt": "2024-06-01 09:00:00"
        }"#;

        let payload: ConditionsPayload = serde_json::from_str(body).expect("decode");
        let observation = payload.to_observation();

        assert_eq!(observation.temperature, 21.4);
        assert_eq!(observation.wind_speed, 6.7);
        assert_eq!(observation.condition_id, 502);
        assert_eq!(observation.description, "heavy rain");
        assert_eq!(observation.timestamp, "2024-06-01 09:00:00");
    }

    #[test]
    fn missing_fields_default_to_zero_or_empty() {
        let payload: ConditionsPayload = serde_json::from_str("{}").expect("decode");
        let observation = payload.to_observation();

        assert_eq!(observation.temperature, 0.0);
        assert_eq!(observation.wind_speed, 0.0);
        assert_eq!(observation.condition_id, 0);
        assert!(observation.description.is_empty());
        assert!(observation.timestamp.is_empty());
    }

    #[test]
    fn forecast_payload_preserves_entry_order() {
        let body = r#"{
            "list": [
                {"main": {"temp": 30.0}, "dt_txt": "2024-06-01 12:00:00"},
                {"main": {"temp": 25.0}, "dt_txt": "2024-06-01 15:00:00"}
            ]
        }"#;

        let payload: ForecastPayload = serde_json::from_str(body).expect("decode");
        let series = payload.to_series();

        assert_eq!(series.entries.len(), 2);
        assert_eq!(series.entries[0].temperature, 30.0);
        assert_eq!(series.entries[1].timestamp, "2024-06-01 15:00:00");
    }

    #[test]
    fn air_pollution_payload_extracts_pm25() {
        let body = r#"{
            "list": [{"main": {"aqi": 4}, "components": {"co": 350.0, "pm2_5": 160.0, "pm10": 180.0}}]
        }"#;

        let payload: AirPollutionPayload = serde_json::from_str(body).expect("decode");
        assert_eq!(payload.to_sample().pm2_5, 160.0);
    }

    #[test]
    fn air_pollution_payload_with_empty_list() {
        let payload: AirPollutionPayload = serde_json::from_str("{}").expect("decode");
        assert_eq!(payload.to_sample().pm2_5, 0.0);
    }
}
