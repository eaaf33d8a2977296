use placefind_core::InputError;
use placefind_voice::VoiceError;
use placefind_wiki::WikiError;
use thiserror::Error;

/// Why a voice request produced no query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceFailure {
    /// Nobody spoke within the capture window.
    Timeout,
    /// Speech was heard but not recognised.
    NotUnderstood,
    /// The speech service could not be reached.
    Network,
}

impl std::fmt::Display for VoiceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "listening timed out"),
            Self::NotUnderstood => write!(f, "speech was not understood"),
            Self::Network => write!(f, "speech service unreachable"),
        }
    }
}

/// A failure the orchestrator cannot classify for the user.
#[derive(Debug, Error)]
pub enum ServiceFailure {
    #[error("encyclopedia lookup failed: {0}")]
    Lookup(#[from] WikiError),

    #[error("voice capture failed: {0}")]
    Capture(#[from] VoiceError),
}

#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// The query was empty after trimming. Recoverable by re-prompting.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Voice capture ended without a transcript. Recoverable by re-prompting.
    #[error("voice input failed: {0}")]
    Voice(VoiceFailure),

    #[error(transparent)]
    ServiceFailure(#[from] ServiceFailure),
}

impl From<VoiceFailure> for OrchestrationError {
    fn from(kind: VoiceFailure) -> Self {
        Self::Voice(kind)
    }
}

impl OrchestrationError {
    /// `true` for failures the user can fix by asking again.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Input(_) | Self::Voice(_))
    }
}
