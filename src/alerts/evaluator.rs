//! Threshold rule evaluation for a single weather observation
//!
//! The rule set is stateless: each rule is checked independently against the
//! configured thresholds and may add one alert line. Rules are not mutually
//! exclusive, so one observation can produce several alerts.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::config::AlertThresholds;
use crate::models::WeatherObservation;

/// Evaluate one observation against the thresholds, producing zero or more
/// alert lines tagged with the given time label.
#[must_use]
pub fn evaluate_observation(
    observation: &WeatherObservation,
    label: &str,
    thresholds: &AlertThresholds,
) -> Vec<String> {
    let mut alerts = Vec::new();

    let temp = observation.temperature;
    let wind = observation.wind_speed;
    let code = observation.condition_id;
    let description = observation.description.as_str();

    if temp >= thresholds.high_temp {
        alerts.push(format!("{label} 🔥 heat {temp:.0}°C"));
    }

    if temp <= thresholds.low_temp {
        alerts.push(format!("{label} ❄️ cold {temp:.0}°C"));
    }

    if wind >= thresholds.high_wind {
        alerts.push(format!("{label} 💨 strong wind {wind:.0} m/s"));
    }

    // 501 moderate rain .. 531 ragged shower rain
    if thresholds.moderate_rain && (501..=531).contains(&code) {
        alerts.push(format!("{label} 🌧️ {description}"));
    }

    // 600..622: every snow variant
    if thresholds.any_snow && (600..=622).contains(&code) {
        alerts.push(format!("{label} 🌨️ {description}"));
    }

    // thunderstorms are always worth an alert, no threshold flag
    if (200..300).contains(&code) {
        alerts.push(format!("{label} ⛈️ {description}"));
    }

    alerts
}

/// Turn a provider timestamp ("2024-06-01 09:00:00") into a compact label
/// like "6/1 morning". Unparseable input is returned unchanged.
#[must_use]
pub fn format_time_label(dt_txt: &str) -> String {
    let Ok(dt) = NaiveDateTime::parse_from_str(dt_txt, "%Y-%m-%d %H:%M:%S") else {
        return dt_txt.to_string();
    };

    let period = match dt.hour() {
        5..=11 => "morning",
        12..=17 => "afternoon",
        _ => "evening",
    };

    format!("{}/{} {}", dt.month(), dt.day(), period)
}

/// Remove duplicate alert lines, keeping the first occurrence of each.
#[must_use]
pub fn dedup_alerts(alerts: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    alerts
        .iter()
        .filter(|alert| seen.insert(alert.as_str()))
        .cloned()
        .collect()
}
