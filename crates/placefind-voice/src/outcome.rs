/// Result of one capture attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCaptureOutcome {
    /// Best-guess transcript, verbatim. Never blank.
    Transcribed(String),
    /// Speech was heard but the service could not make words of it.
    Unintelligible,
    /// The speech service was unreachable or rejected the request.
    ServiceUnavailable,
    /// Nobody spoke within the listening window.
    TimedOut,
}

impl VoiceCaptureOutcome {
    /// Wraps a transcript, treating a blank one as [`Self::Unintelligible`].
    #[must_use]
    pub fn from_transcript(text: String) -> Self {
        if text.trim().is_empty() {
            Self::Unintelligible
        } else {
            Self::Transcribed(text)
        }
    }
}
