use thiserror::Error;

#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network failure or non-2xx status (quota exhaustion arrives as 403).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("API key pool is empty")]
    EmptyKeyPool,
}
