use thiserror::Error;

/// Errors returned by the encyclopedia client.
///
/// "Page does not exist" and "disambiguation page" are not errors; the
/// resolver reports those as [`placefind_core::ResolutionResult`] variants.
#[derive(Debug, Error)]
pub enum WikiError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an `{"error": {...}}` envelope.
    #[error("wiki API error {code}: {info}")]
    Api { code: String, info: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed but lacks a field the lookup depends on.
    #[error("unexpected response for {context}: {reason}")]
    UnexpectedResponse { context: String, reason: String },

    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
}
