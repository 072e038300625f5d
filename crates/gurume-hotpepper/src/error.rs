use thiserror::Error;

/// Errors returned by the gourmet API client.
#[derive(Debug, Error)]
pub enum HotpepperError {
    /// The access key is not configured. Raised before any request is sent.
    #[error("HOTPEPPER_API_KEY is not set")]
    MissingApiKey,

    /// The base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The upstream answered with a non-2xx status.
    #[error("upstream request failed with status {status}")]
    UpstreamStatus { status: u16 },

    /// The upstream answered 2xx but reported an error in the result envelope.
    #[error("upstream API error {code}: {message}")]
    Api { code: i64, message: String },

    /// A single-shop lookup matched nothing.
    #[error("No shop found")]
    NotFound { id: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl HotpepperError {
    /// HTTP status the boundary should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            HotpepperError::UpstreamStatus { status } => *status,
            HotpepperError::NotFound { .. } => 404,
            HotpepperError::Api { .. } => 502,
            HotpepperError::MissingApiKey
            | HotpepperError::InvalidBaseUrl { .. }
            | HotpepperError::Http(_)
            | HotpepperError::Deserialize { .. } => 500,
        }
    }

    /// Whether the message is safe to show to a caller. Internal failures get a
    /// generic message at the boundary instead.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            HotpepperError::InvalidBaseUrl { .. }
                | HotpepperError::Http(_)
                | HotpepperError::Deserialize { .. }
        )
    }
}
