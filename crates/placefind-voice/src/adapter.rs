use std::sync::Arc;
use std::time::Duration;

use placefind_core::AppConfig;

use crate::error::VoiceError;
use crate::listener::{listen, Heard, ListenerSettings};
use crate::microphone::Microphone;
use crate::outcome::VoiceCaptureOutcome;
use crate::speech::SpeechClient;

/// Turns one spoken phrase into a [`VoiceCaptureOutcome`].
///
/// Stateless between calls: every [`VoiceInputAdapter::capture`] opens the
/// microphone afresh and releases it before returning.
pub struct VoiceInputAdapter<M> {
    microphone: Arc<M>,
    speech: SpeechClient,
    settings: ListenerSettings,
}

impl<M: Microphone> VoiceInputAdapter<M> {
    #[must_use]
    pub fn new(microphone: M, speech: SpeechClient, settings: ListenerSettings) -> Self {
        Self {
            microphone: Arc::new(microphone),
            speech,
            settings,
        }
    }

    /// Builds an adapter around `microphone` from the process-wide
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError`] if the speech client cannot be constructed.
    pub fn from_config(microphone: M, config: &AppConfig) -> Result<Self, VoiceError> {
        let speech = SpeechClient::from_config(config)?;
        Ok(Self::new(
            microphone,
            speech,
            ListenerSettings::from_config(config),
        ))
    }

    /// Records one phrase and transcribes it.
    ///
    /// Waits up to `timeout` for speech to start. The microphone is held only
    /// while recording and is released before the audio goes to the speech
    /// service. Without an API key the microphone is never opened and the
    /// outcome is [`VoiceCaptureOutcome::ServiceUnavailable`].
    ///
    /// # Errors
    ///
    /// Hardware failures ([`VoiceError::NoInputDevice`],
    /// [`VoiceError::Device`], [`VoiceError::Stream`]), a failed capture
    /// worker, WAV encoding errors and unparseable service responses.
    /// Unreachable or refusing speech services are reported as
    /// [`VoiceCaptureOutcome::ServiceUnavailable`] instead.
    pub async fn capture(&self, timeout: Duration) -> Result<VoiceCaptureOutcome, VoiceError> {
        if !self.speech.has_api_key() {
            tracing::warn!("speech service API key is not configured; not listening");
            return Ok(VoiceCaptureOutcome::ServiceUnavailable);
        }

        let microphone = Arc::clone(&self.microphone);
        let settings = self.settings.clone();

        let heard = tokio::task::spawn_blocking(move || {
            let mut session = microphone.open()?;
            let heard = listen(&mut session, timeout, &settings);
            drop(session);
            heard
        })
        .await
        .map_err(|e| VoiceError::Worker(e.to_string()))??;

        let clip = match heard {
            Heard::TimedOut => return Ok(VoiceCaptureOutcome::TimedOut),
            Heard::Phrase(clip) => clip,
        };

        match self.speech.recognize(&clip).await {
            Ok(Some(text)) => Ok(VoiceCaptureOutcome::from_transcript(text)),
            Ok(None) => {
                tracing::info!("speech service returned no transcript");
                Ok(VoiceCaptureOutcome::Unintelligible)
            }
            Err(e) if e.is_service_failure() => {
                tracing::warn!(error = %e, "speech service unavailable");
                Ok(VoiceCaptureOutcome::ServiceUnavailable)
            }
            Err(e) => Err(e),
        }
    }
}
