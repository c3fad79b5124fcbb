//! Error types for the person API client.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because the workflows
//! react to them differently from "the request did not work". Everything else
//! that goes wrong between sending and receiving is a `Transport` error: a
//! network failure carries no status, an unexpected non-2xx carries one.

use thiserror::Error;

/// Errors returned by `PersonClient` parse methods and `Transport`
/// implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not produce a usable response: the network failed
    /// (`status` is `None`) or the server answered with an unexpected non-2xx.
    #[error("transport error{}: {message}", status_suffix(.status))]
    Transport { status: Option<u16>, message: String },

    /// The server returned 404: the requested person does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server rejected a create/update payload (400 or 422).
    #[error("payload rejected (HTTP {status}): {body}")]
    Validation { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// No request was sent: the id or base URL cannot form a resource URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// A failure with no HTTP response at all.
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// A base URL handed to `ClientConfig` is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{endpoint} base URL is empty")]
    Empty { endpoint: &'static str },

    #[error("{endpoint} base URL {url:?} is invalid: {reason}")]
    Invalid {
        endpoint: &'static str,
        url: String,
        reason: String,
    },

    #[error("{endpoint} base URL {url:?} must use http or https")]
    UnsupportedScheme { endpoint: &'static str, url: String },
}
