use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubFlow {
    Upload,
    Query,
}

impl fmt::Display for SubFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubFlow::Upload => f.write_str("An upload is already in progress"),
            SubFlow::Query => f.write_str("A query is already in progress"),
        }
    }
}

/// Failure of one user-initiated attempt. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upload(String),

    #[error("{0}")]
    Query(String),

    #[error("{0}")]
    InFlight(SubFlow),
}

impl FlowError {
    pub fn validation(message: &str) -> Self {
        FlowError::Validation(message.to_string())
    }
}

/// Errors raised by the HTTP layer before they are mapped to a user message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("<no error field>"))]
    Status {
        status: reqwest::StatusCode,
        message: Option<String>,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

impl ApiError {
    /// Message the backend reported, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }
}
