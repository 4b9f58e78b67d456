//! Error types for Trello API operations.

/// Result type alias for collector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to the Trello API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport or JSON decoding failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Trello API error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the API.
        body: String,
    },
}

impl Error {
    /// Creates an API error from a status code and response body.
    #[must_use]
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }
}
