//! Request outcome types.
//!
//! A request resolves to exactly one `RequestOutcome`: the decoded payload,
//! or one of three classified failures.

use std::fmt;

use reqwest::{Method, Url};
use serde_json::Value;
use thiserror::Error;

/// Message carried by every `RequestError::NoResponse`.
pub const NO_RESPONSE_MESSAGE: &str = "No response from server";

/// Result of one gateway request.
pub type RequestOutcome = Result<Value, RequestError>;

/// The request that was sent but never answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHandle {
    pub method: Method,
    pub url: Url,
}

impl fmt::Display for RequestHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Classified request failure.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RequestError {
    /// The server answered with a non-2xx status
    #[error("{message}")]
    Status {
        status: u16,
        data: Option<Value>,
        message: String,
    },

    /// The request went out but nothing came back (connect failure, timeout)
    #[error("{message} ({request})")]
    NoResponse { message: String, request: RequestHandle },

    /// The request could not be built or sent
    #[error("{message}")]
    Construction { message: String },
}

impl RequestError {
    /// Build a `NoResponse` error for the given request.
    pub fn no_response(request: RequestHandle) -> Self {
        RequestError::NoResponse {
            message: NO_RESPONSE_MESSAGE.to_string(),
            request,
        }
    }

    /// Build a `Construction` error.
    pub fn construction(message: impl Into<String>) -> Self {
        RequestError::Construction {
            message: message.into(),
        }
    }

    /// Human-readable message for any variant.
    pub fn message(&self) -> &str {
        match self {
            RequestError::Status { message, .. }
            | RequestError::NoResponse { message, .. }
            | RequestError::Construction { message } => message,
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
