use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerApiError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("request error: {0}")]
    Request(#[source] reqwest::Error),

    #[error("HTTP {code}: {1}", code = .0.as_u16())]
    Status(StatusCode, String),

    #[error("runtime failure: {0}")]
    Runtime(String),
}

impl RunnerApiError {
    /// True for failures that happened on the wire rather than before sending.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::InvalidBaseUrl(_) | Self::InvalidRequest(_))
    }

    pub(crate) fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Request(error)
        }
    }
}

/// Error envelopes the runner service (or a proxy in front of it) may return.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    detail: Option<ErrorDetail>,
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Fields { message: Option<String> },
    Other(serde_json::Value),
}

impl ErrorDetail {
    fn message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => non_empty_string(message),
            Self::Fields { message } => message.as_deref().and_then(non_empty_string),
            Self::Other(_) => None,
        }
    }
}

/// Summarize a non-2xx body into one line for the user.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        let message = payload
            .detail
            .as_ref()
            .and_then(ErrorDetail::message)
            .or_else(|| payload.error.as_ref().and_then(ErrorDetail::message));
        if let Some(message) = message {
            return message.to_string();
        }
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

fn non_empty_string(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
