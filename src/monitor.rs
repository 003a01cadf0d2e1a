//! Run orchestration
//!
//! One invocation walks four steps: current weather, air quality, forecast
//! window, notification. The steps are independent; a failed fetch degrades
//! only its own step and the run always completes.

use anyhow::Result;
use tracing::{error, info, warn};

use crate::alerts::evaluator::{dedup_alerts, evaluate_observation, format_time_label};
use crate::alerts::notifier::Notifier;
use crate::config::{AlertThresholds, SkywatchConfig};
use crate::error::FetchError;
use crate::models::{AirQualitySample, ForecastSeries, WeatherObservation};
use crate::provider::WeatherClient;

/// Ties the provider client, the rule thresholds and the notifier together
/// for one scheduling period. Built once from the loaded configuration.
pub struct Monitor {
    client: WeatherClient,
    notifier: Notifier,
    thresholds: AlertThresholds,
    city_name: String,
}

impl Monitor {
    /// Build the monitor from the loaded configuration
    pub fn new(config: &SkywatchConfig) -> Result<Self> {
        Ok(Self {
            client: WeatherClient::new(config.provider.clone())?,
            notifier: Notifier::new(config.telegram.clone())?,
            thresholds: config.thresholds.clone(),
            city_name: config.provider.city_name.clone(),
        })
    }

    /// Run one full evaluation cycle and push a notification if any rule
    /// fired. Returns the accumulated (pre-dedup) alert lines.
    pub fn run_once(&self) -> Vec<String> {
        info!(
            "Checking weather for {} over the next 2 days",
            self.city_name
        );

        info!("Fetching current weather...");
        let current = self.client.current_weather();
        info!("Fetching air quality...");
        let air = self.client.air_pollution();
        info!("Fetching forecast...");
        let forecast = self.client.forecast();

        let alerts = collect_alerts(&current, &air, &forecast, &self.thresholds);

        if alerts.is_empty() {
            info!("Weather looks fine, no action needed");
        } else {
            let unique = dedup_alerts(&alerts);
            warn!("{} alert(s) found, sending notification", unique.len());
            if let Err(err) = self.notifier.notify(&self.city_name, &alerts) {
                error!("Notification failed: {err}");
            }
        }

        info!("Check complete");
        alerts
    }

    /// Exercise all three provider endpoints and the chat sink, reporting
    /// pass/fail per integration. Used by the `test` entry mode.
    pub fn connection_test(&self) -> bool {
        info!("Testing provider and chat sink connectivity");

        let weather_ok = match self.client.current_weather() {
            Ok(observation) => {
                info!("Weather API ok: {}", observation.summary());
                true
            }
            Err(err) => {
                error!("Weather API failed: {err}");
                false
            }
        };

        let air_ok = match self.client.air_pollution() {
            Ok(sample) => {
                info!("Air quality API ok: AQI {}", sample.aqi());
                true
            }
            Err(err) => {
                error!("Air quality API failed: {err}");
                false
            }
        };

        let forecast_ok = match self.client.forecast() {
            Ok(series) => {
                info!("Forecast API ok: {} entries", series.entries.len());
                true
            }
            Err(err) => {
                error!("Forecast API failed: {err}");
                false
            }
        };

        let telegram_ok = match self
            .notifier
            .deliver("🔔 skywatch connection test\n\nThe bot can reach this chat.")
        {
            Ok(()) => {
                info!("Telegram ok");
                true
            }
            Err(err) => {
                error!("Telegram failed: {err}");
                false
            }
        };

        weather_ok && air_ok && forecast_ok && telegram_ok
    }
}

/// Walk the three evaluation steps over already-fetched results and
/// accumulate alert lines in step order: current conditions, air quality,
/// forecast window. Pure with respect to its inputs.
pub fn collect_alerts(
    current: &Result<WeatherObservation, FetchError>,
    air: &Result<AirQualitySample, FetchError>,
    forecast: &Result<ForecastSeries, FetchError>,
    thresholds: &AlertThresholds,
) -> Vec<String> {
    let mut all_alerts = Vec::new();

    match current {
        Ok(observation) => {
            info!("Current: {}", observation.summary());
            let alerts = evaluate_observation(observation, "current", thresholds);
            if !alerts.is_empty() {
                warn!("Current weather alerts: {alerts:?}");
            }
            all_alerts.extend(alerts);
        }
        Err(err) => error!("Current weather fetch failed: {err}"),
    }

    match air {
        Ok(sample) => {
            let aqi = sample.aqi();
            if aqi > thresholds.aqi_limit {
                warn!("AQI: {aqi}, over the {} limit", thresholds.aqi_limit);
                all_alerts.push(format!("current 😷 haze AQI {aqi}"));
            } else {
                info!("AQI: {aqi}");
            }
        }
        Err(err) => error!("Air quality fetch failed: {err}"),
    }

    match forecast {
        Ok(series) => {
            let window = series.window();
            info!("Evaluating {} forecast entries", window.len());
            for entry in window {
                let label = format_time_label(&entry.timestamp);
                let alerts = evaluate_observation(entry, &label, thresholds);

                // surface rain/snow-range entries even when no rule fired
                if !alerts.is_empty() {
                    warn!("{} | {} | {alerts:?}", entry.timestamp, entry.summary());
                } else if (500..=622).contains(&entry.condition_id) {
                    info!("{} | {}", entry.timestamp, entry.summary());
                }

                all_alerts.extend(alerts);
            }
        }
        Err(err) => error!("Forecast fetch failed: {err}"),
    }

    all_alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(temp: f64, wind: f64, code: u32, desc: &str, ts: &str) -> WeatherObservation {
        WeatherObservation {
            temperature: temp,
            wind_speed: wind,
            condition_id: code,
            description: desc.to_string(),
            timestamp: ts.to_string(),
        }
    }

    fn benign() -> WeatherObservation {
        observation(20.0, 3.0, 800, "clear sky", "")
    }

    #[test]
    fn quiet_run_accumulates_nothing() {
        let alerts = collect_alerts(
            &Ok(benign()),
            &Ok(AirQualitySample { pm2_5: 10.0 }),
            &Ok(ForecastSeries {
                entries: vec![observation(22.0, 4.0, 801, "few clouds", "2024-06-01 12:00:00")],
            }),
            &AlertThresholds::default(),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn full_scenario_yields_three_distinct_alerts() {
        let thresholds = AlertThresholds {
            any_snow: true,
            ..AlertThresholds::default()
        };

        let current = Ok(observation(36.0, 3.0, 800, "clear sky", ""));
        let air = Ok(AirQualitySample { pm2_5: 160.0 });
        let forecast = Ok(ForecastSeries {
            entries: vec![observation(
                -2.0,
                3.0,
                601,
                "snow",
                "2024-06-01 18:00:00",
            )],
        });

        let alerts = collect_alerts(&current, &air, &forecast, &thresholds);
        let unique = dedup_alerts(&alerts);

        assert_eq!(unique.len(), 3);
        assert!(unique[0].contains("🔥"));
        assert_eq!(unique[1], "current 😷 haze AQI 210");
        assert!(unique[2].contains("🌨️"));
        assert!(unique[2].contains("6/1 evening"));
    }

    #[test]
    fn forecast_failure_degrades_only_its_own_step() {
        let thresholds = AlertThresholds::default();

        let alerts = collect_alerts(
            &Ok(observation(36.0, 3.0, 800, "clear sky", "")),
            &Ok(AirQualitySample { pm2_5: 160.0 }),
            &Err(FetchError::Timeout),
            &thresholds,
        );

        let unique = dedup_alerts(&alerts);
        assert_eq!(unique.len(), 2);
        assert!(unique[0].contains("heat"));
        assert!(unique[1].contains("haze"));
    }

    #[test]
    fn all_fetches_failing_still_completes() {
        let alerts = collect_alerts(
            &Err(FetchError::Transport("dns".into())),
            &Err(FetchError::Timeout),
            &Err(FetchError::Status(503)),
            &AlertThresholds::default(),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn aqi_at_limit_does_not_alert() {
        // 115 µg/m³ sits exactly on the 150 category boundary
        let alerts = collect_alerts(
            &Ok(benign()),
            &Ok(AirQualitySample { pm2_5: 115.0 }),
            &Ok(ForecastSeries::default()),
            &AlertThresholds::default(),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn forecast_window_is_bounded() {
        // 40 hot entries, only the first 16 get evaluated
        let entries: Vec<WeatherObservation> = (0..40)
            .map(|i| observation(40.0, 3.0, 800, "clear sky", &format!("2024-06-01 {i:02}:00:00")))
            .collect();

        let alerts = collect_alerts(
            &Err(FetchError::Timeout),
            &Err(FetchError::Timeout),
            &Ok(ForecastSeries { entries }),
            &AlertThresholds::default(),
        );
        assert_eq!(alerts.len(), 16);
    }

    #[test]
    fn repeated_conditions_dedup_to_one_line() {
        // same label and temperature at two forecast hours of one afternoon
        let entries = vec![
            observation(36.0, 3.0, 800, "clear sky", "2024-06-01 12:00:00"),
            observation(36.0, 3.0, 800, "clear sky", "2024-06-01 15:00:00"),
        ];

        let alerts = collect_alerts(
            &Err(FetchError::Timeout),
            &Err(FetchError::Timeout),
            &Ok(ForecastSeries { entries }),
            &AlertThresholds::default(),
        );

        assert_eq!(alerts.len(), 2);
        assert_eq!(dedup_alerts(&alerts).len(), 1);
    }
}
