use thiserror::Error;

/// Errors returned by the trends API client.
///
/// Unlike video discovery, trend fetch failures are surfaced to the caller so
/// the orchestrator can record them against the failing country.
#[derive(Debug, Error)]
pub enum TrendsError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
