// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ItunesError>;

#[derive(Debug, Error)]
pub enum ItunesError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Request cancelled")]
    Cancelled,

    /// `status_text` is the full status line, e.g. `404 Not Found`.
    #[error("Unexpected status: {status_text}")]
    UnexpectedStatus { status: u16, status_text: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ItunesError {
    /// True when the transport gave up because the client timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ItunesError::RequestFailed(e) if e.is_timeout())
    }
}
