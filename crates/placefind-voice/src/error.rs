use thiserror::Error;

/// Errors raised while capturing or transcribing speech.
///
/// Only some of these are "expected" failures: [`VoiceError::is_service_failure`]
/// picks out the ones the adapter reports as
/// [`crate::VoiceCaptureOutcome::ServiceUnavailable`]. The rest are hardware
/// or protocol faults returned to the caller as-is.
#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("no audio input device available")]
    NoInputDevice,

    /// The input device rejected its configuration or stream setup.
    #[error("audio device error: {0}")]
    Device(String),

    /// The input stream failed while recording.
    #[error("audio stream error: {0}")]
    Stream(String),

    /// The blocking capture worker panicked or was cancelled.
    #[error("capture worker failed: {0}")]
    Worker(String),

    #[error("WAV encoding error: {0}")]
    Encode(#[from] hound::Error),

    #[error("speech service API key is not configured")]
    MissingApiKey,

    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

impl VoiceError {
    /// `true` when the speech service could not be reached or refused the
    /// request.
    #[must_use]
    pub fn is_service_failure(&self) -> bool {
        matches!(self, Self::Http(_) | Self::MissingApiKey)
    }
}
