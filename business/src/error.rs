//! Normalized error shape shared by every domain service.
//!
//! Whatever went wrong (the backend answered with an error status, nothing answered, or
//! the request could not even be built) callers see one [`ApiError`] with a message fit
//! for display, the HTTP status (0 when there was no response) and opaque details.

use serde_json::Value;
use thiserror::Error;

use crate::http::{Method, Response, TransportError};

/// Shown when a request was sent but no response came back.
pub const NO_RESPONSE_MESSAGE: &str = "No response from server. Please check your connection.";

/// Shown when a request failed before sending and the cause had no message.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Shown when a 2xx body does not have the expected shape.
pub const INVALID_RESPONSE_MESSAGE: &str = "Unexpected response from server";

/// Where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The backend answered with a non-2xx status.
    Server,
    /// The request went out but no response arrived (connect failure, timeout, reset).
    Network,
    /// The request could not be constructed or persisted locally.
    ClientSetup,
    /// The backend answered 2xx but the body did not match the expected envelope.
    InvalidResponse,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// HTTP status code, or 0 when no response was received.
    pub status: u16,
    pub details: Value,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>, status: u16, details: Value) -> Self {
        Self {
            kind,
            message: message.into(),
            status,
            details,
        }
    }

    /// Maps a non-2xx response. The server's `message` field wins over `fallback`.
    pub fn from_response(response: &Response, fallback: &str) -> Self {
        let details = response_details(response);
        let message = details
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_owned();

        Self::new(ApiErrorKind::Server, message, response.status, details)
    }

    /// Maps a failure that produced no response at all.
    pub fn from_transport(error: &TransportError, method: Method, url: &str) -> Self {
        match error {
            TransportError::Build(cause) => Self::new(
                ApiErrorKind::ClientSetup,
                non_empty_or(cause, UNEXPECTED_ERROR_MESSAGE),
                0,
                Value::String(cause.clone()),
            ),
            TransportError::NoResponse(cause) => Self::new(
                ApiErrorKind::Network,
                NO_RESPONSE_MESSAGE,
                0,
                serde_json::json!({
                    "method": method.as_str(),
                    "url": url,
                    "cause": cause,
                }),
            ),
        }
    }

    /// Maps a 2xx response whose body could not be decoded.
    pub fn invalid_response(response: &Response, cause: &serde_json::Error) -> Self {
        Self::new(
            ApiErrorKind::InvalidResponse,
            INVALID_RESPONSE_MESSAGE,
            response.status,
            serde_json::json!({
                "cause": cause.to_string(),
                "body": response_details(response),
            }),
        )
    }

    /// A client-side failure that happened before or after the request (e.g. storage).
    pub fn client_setup(message: impl Into<String>) -> Self {
        let message = message.into();
        let details = Value::String(message.clone());
        Self::new(ApiErrorKind::ClientSetup, message, 0, details)
    }
}

/// Client-side validation failure. Blocks submission before any request is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Form fields that failed validation, in form order.
    pub fields: Vec<&'static str>,
    pub message: String,
}

impl ValidationError {
    pub fn new(fields: Vec<&'static str>, message: impl Into<String>) -> Self {
        Self {
            fields,
            message: message.into(),
        }
    }
}

/// Any failure a view controller can surface as its dismissable error line.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ViewError {
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(e) => &e.message,
            Self::Api(e) => &e.message,
        }
    }

    /// HTTP status for API failures; `None` for client-side validation.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => None,
            Self::Api(e) => Some(e.status),
        }
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

fn response_details(response: &Response) -> Value {
    if response.body.is_empty() {
        return Value::Null;
    }
    response
        .json::<Value>()
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&response.body).into_owned()))
}

fn non_empty_or(message: &str, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_owned()
    } else {
        message.to_owned()
    }
}
