//! Alert machinery: threshold rules, AQI derivation and chat delivery

pub mod aqi;
pub mod evaluator;
pub mod notifier;

pub use evaluator::{dedup_alerts, evaluate_observation, format_time_label};
pub use notifier::Notifier;
