use thiserror::Error;

/// Errors returned by the Torre API client.
#[derive(Debug, Error)]
pub enum TorreError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status other than 404 on a
    /// profile lookup.
    #[error("Torre API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// No profile exists for the requested username.
    #[error("user {username} not found")]
    NotFound { username: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl TorreError {
    /// `true` for failures that mean the upstream could not serve the request
    /// at all (transport errors and unexpected statuses).
    #[must_use]
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}
