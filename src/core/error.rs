// src/core/error.rs
use thiserror::Error;

/// Failure of a single backend fetch.
///
/// Contained at the panel that issued the fetch; see `views::PanelState`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response.
    #[error("API error: {status} {status_text} ({url})")]
    Fetch {
        status: u16,
        status_text: String,
        url: String,
    },

    /// The request never produced a response (connect, timeout, body read).
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body is not JSON of the expected shape.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
