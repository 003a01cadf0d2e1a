//! Error types and handling for the `skywatch` application

use thiserror::Error;

/// Main error type for the `skywatch` application
#[derive(Error, Debug)]
pub enum SkywatchError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather provider communication errors
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// Chat notification delivery errors
    #[error("Notification error: {message}")]
    Notify { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl SkywatchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new notification error
    pub fn notify<S: Into<String>>(message: S) -> Self {
        Self::Notify {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkywatchError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            SkywatchError::Provider { .. } => {
                "Unable to reach the weather provider. Please check your internet connection."
                    .to_string()
            }
            SkywatchError::Notify { .. } => {
                "Unable to deliver the chat notification. Please check your bot token and chat id."
                    .to_string()
            }
            SkywatchError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            SkywatchError::General { message } => message.clone(),
        }
    }
}

/// Failure of one bounded-timeout HTTP call.
///
/// Every external call is a single attempt; the caller pattern-matches on this
/// instead of aborting the run, so a failed call degrades only its own step.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The call did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Connection, DNS or protocol-level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success HTTP status
    #[error("endpoint returned status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
