//! Chat notification delivery
//!
//! Formats the deduplicated alert list into one message and pushes it to the
//! Telegram Bot API. Delivery is a single bounded-timeout POST; a failure is
//! logged and reported, never retried.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{debug, error, info};

use crate::alerts::evaluator::dedup_alerts;
use crate::config::TelegramConfig;
use crate::error::FetchError;

/// Closing line appended to every alert message
const CLOSING_SUGGESTION: &str = "💡 Best to stay in and order groceries online";

/// Notifier for pushing alert messages to the chat sink
pub struct Notifier {
    client: reqwest::blocking::Client,
    config: TelegramConfig,
}

impl Notifier {
    /// Create a new notifier with its own bounded-timeout HTTP client
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("skywatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client for the notifier")?;

        Ok(Self { client, config })
    }

    /// Format and deliver the accumulated alerts as one message.
    ///
    /// Deduplicates first; an empty (or all-duplicate-empty) list sends
    /// nothing and reports success.
    pub fn notify(&self, city_name: &str, alerts: &[String]) -> Result<(), FetchError> {
        match format_alert_message(city_name, alerts) {
            Some(message) => self.deliver(&message),
            None => {
                debug!("No alerts to deliver");
                Ok(())
            }
        }
    }

    /// Send one message to the configured chat
    pub fn deliver(&self, text: &str) -> Result<(), FetchError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.base_url, self.config.bot_token
        );
        let payload = json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": "HTML",
        });

        let response = self.client.post(url).json(&payload).send()?;

        let status = response.status();
        if !status.is_success() {
            error!("Telegram message failed with status {status}");
            return Err(FetchError::Status(status.as_u16()));
        }

        info!("Telegram message delivered");
        Ok(())
    }
}

/// Build the alert message: header, one bullet per distinct alert, closing
/// suggestion. Returns `None` when there is nothing to report.
#[must_use]
pub fn format_alert_message(city_name: &str, alerts: &[String]) -> Option<String> {
    let unique = dedup_alerts(alerts);
    if unique.is_empty() {
        return None;
    }

    let mut message = format!("🚨 <b>{city_name} weather alert</b>\n\n");
    message.push_str("📅 Unfavorable for going out over the next 2 days:\n\n");

    for alert in &unique {
        message.push_str(&format!("• {alert}\n"));
    }

    message.push('\n');
    message.push_str(CLOSING_SUGGESTION);

    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_alert_list_produces_no_message() {
        assert!(format_alert_message("Beijing", &[]).is_none());
    }

    #[test]
    fn message_has_header_bullets_and_closing() {
        let alerts = vec![
            "current 🔥 heat 36°C".to_string(),
            "6/1 evening 🌨️ light snow".to_string(),
            "current 😷 haze AQI 210".to_string(),
        ];
        let message = format_alert_message("Beijing", &alerts).expect("message");

        assert!(message.starts_with("🚨 <b>Beijing weather alert</b>"));
        assert_eq!(message.matches("• ").count(), 3);
        assert!(message.contains("• current 🔥 heat 36°C\n"));
        assert!(message.ends_with(CLOSING_SUGGESTION));
    }

    #[test]
    fn message_deduplicates_alert_lines() {
        let alerts = vec![
            "current 🔥 heat 36°C".to_string(),
            "current 🔥 heat 36°C".to_string(),
            "6/1 evening 💨 strong wind 12 m/s".to_string(),
        ];
        let message = format_alert_message("Beijing", &alerts).expect("message");
        assert_eq!(message.matches("• ").count(), 2);
        assert_eq!(message.matches("heat 36°C").count(), 1);
    }

    #[test]
    fn notifier_construction() {
        let notifier = Notifier::new(TelegramConfig {
            bot_token: "123:abc".to_string(),
            chat_id: "42".to_string(),
            base_url: "https://api.telegram.org".to_string(),
            timeout_seconds: 10,
        });
        assert!(notifier.is_ok());
    }
}
