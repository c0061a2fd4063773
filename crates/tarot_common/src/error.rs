use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Message the backend puts in a 401 body when the bearer token has run out.
pub const TOKEN_EXPIRED_MESSAGE: &str = "Token is expired";

/// The base error type for the tarot client.
///
/// Each crate can extend this by implementing `From<SpecificError> for TarotError`.
#[derive(Error, Debug)]
pub enum TarotError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl TarotError {
    /// True when the API rejected the session token as expired.
    pub fn is_token_expired(&self) -> bool {
        matches!(self, TarotError::AuthError(msg) if msg == TOKEN_EXPIRED_MESSAGE)
    }
}

/// Failure of a single call against the booking REST API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned an error: {message} (Status: {status})")]
    Status { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("Failed to encode request body: {0}")]
    Encoding(String),

    #[error("Token is expired")]
    TokenExpired,
}

/// Error body shape used by the backend: either a single `message`
/// or a list of `errors[].message`.
#[derive(Deserialize, Debug, Default)]
struct ErrorResponse {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Deserialize, Debug)]
struct ErrorItem {
    message: Option<String>,
}

impl ApiError {
    /// Builds the error for a non-success response from its status and raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed: ErrorResponse = serde_json::from_str(body).unwrap_or_default();

        if status == 401 && parsed.message.as_deref() == Some(TOKEN_EXPIRED_MESSAGE) {
            return ApiError::TokenExpired;
        }

        let message = match parsed.message {
            Some(message) => message,
            None => {
                let joined = parsed
                    .errors
                    .into_iter()
                    .filter_map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join(", ");
                if joined.is_empty() {
                    "An error occurred".to_string()
                } else {
                    joined
                }
            }
        };
        ApiError::Status { status, message }
    }

    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::TokenExpired => Some(401),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Parse(_) | ApiError::Encoding(_) => None,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, TarotError>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, TarotError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| TarotError::InternalError(format!("{}: {}", context, error)))
    }
}

// Common error conversions
impl From<ApiError> for TarotError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Request(e) => TarotError::HttpError(e.to_string()),
            ApiError::Status { status, message } => match status {
                404 => TarotError::NotFoundError(message),
                401 | 403 => TarotError::AuthError(message),
                _ => external_service_error(
                    "Booking API",
                    format!("Status: {}, Message: {}", status, message),
                ),
            },
            ApiError::Parse(msg) => TarotError::ParseError(msg),
            ApiError::Encoding(msg) => TarotError::InternalError(msg),
            ApiError::TokenExpired => TarotError::AuthError(TOKEN_EXPIRED_MESSAGE.to_string()),
        }
    }
}

impl From<serde_json::Error> for TarotError {
    fn from(err: serde_json::Error) -> Self {
        TarotError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for TarotError {
    fn from(err: std::io::Error) -> Self {
        TarotError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> TarotError {
    TarotError::ConfigError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> TarotError {
    TarotError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
