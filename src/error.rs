//! Error handling for the calorie tracker client

use std::fmt;
use thiserror::Error;

use crate::messages;

/// Unified error type for the calorie tracker client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Local filesystem errors (persisted session and preferences)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Form input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// 401 from the API
    #[error("{0}")]
    Unauthorized(String),

    /// 404 from the API, message depends on the resource
    #[error("{0}")]
    NotFound(String),

    /// 429 from the API
    #[error("{message}")]
    RateLimited {
        message: String,
        /// Seconds the server asked us to wait, when it said so
        retry_after: Option<u64>,
    },

    /// 500 from the API
    #[error("{0}")]
    Server(String),

    /// Any other non-success status, carrying the status text
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session store errors
    #[error("Session error: {0}")]
    Session(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new session error
    pub fn session<T: fmt::Display>(msg: T) -> Self {
        Error::Session(msg.to_string())
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// HTTP status that produced this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unauthorized(_) => Some(401),
            Error::NotFound(_) => Some(404),
            Error::RateLimited { .. } => Some(429),
            Error::Server(_) => Some(500),
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// The message a controller shows to the user.
    ///
    /// API errors already carry their mapped message. Transport and decoding
    /// failures collapse into a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg)
            | Error::Unauthorized(msg)
            | Error::NotFound(msg)
            | Error::Server(msg) => msg.clone(),
            Error::RateLimited { message, .. } => message.clone(),
            Error::Status { message, .. } => message.clone(),
            Error::Http(e) if e.is_connect() || e.is_timeout() => {
                messages::NETWORK_ERROR.to_string()
            }
            _ => messages::UNEXPECTED_ERROR.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first failing field; forms show one message at a time.
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);
        let message = fields
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| messages::INVALID_INPUT.to_string());
        Error::Validation(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_their_message() {
        let err = Error::NotFound("Posiłek nie istnieje".to_string());
        assert_eq!(err.user_message(), "Posiłek nie istnieje");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn local_errors_fall_back_to_generic_message() {
        let err = Error::session("store unavailable");
        assert_eq!(err.user_message(), messages::UNEXPECTED_ERROR);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn rate_limit_exposes_status() {
        let err = Error::RateLimited {
            message: "slow down".to_string(),
            retry_after: Some(30),
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.to_string(), "slow down");
    }
}
