use std::time::Duration;

use placefind_core::{derive_map_query, MapQuery, Query, ResolutionResult};
use placefind_voice::VoiceCaptureOutcome;
use serde::Serialize;

use crate::error::{OrchestrationError, ServiceFailure, VoiceFailure};
use crate::ports::{NoVoiceInput, PlaceResolver, VoiceInput};

/// Everything the shell needs to render one answered request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The query as resolved; for voice requests, the transcript.
    pub query: Query,
    pub resolution: ResolutionResult,
    pub map_query: MapQuery,
}

pub type OrchestrationResult = Result<Resolution, OrchestrationError>;

/// Turns shell input into a [`Resolution`].
///
/// Each call runs to completion in sequence: capture (voice only), then
/// lookup. Nothing is kept between calls.
pub struct RequestOrchestrator<R, V> {
    resolver: R,
    voice: V,
    voice_timeout: Duration,
}

impl<R: PlaceResolver> RequestOrchestrator<R, NoVoiceInput> {
    /// An orchestrator that only handles typed queries.
    #[must_use]
    pub fn text_only(resolver: R) -> Self {
        Self::new(resolver, NoVoiceInput, Duration::ZERO)
    }
}

impl<R: PlaceResolver, V: VoiceInput> RequestOrchestrator<R, V> {
    /// `voice_timeout` is the window in which the user has to start
    /// speaking.
    #[must_use]
    pub fn new(resolver: R, voice: V, voice_timeout: Duration) -> Self {
        Self {
            resolver,
            voice,
            voice_timeout,
        }
    }

    /// Resolves a typed place name.
    ///
    /// # Errors
    ///
    /// - [`OrchestrationError::Input`] if `raw` is blank; the resolver is
    ///   not called.
    /// - [`OrchestrationError::ServiceFailure`] if the lookup itself failed.
    pub async fn handle_text_query(&self, raw: &str) -> OrchestrationResult {
        let query = Query::parse(raw)?;
        let map_query = derive_map_query(&query);

        let resolution = self
            .resolver
            .resolve(&query)
            .await
            .map_err(ServiceFailure::from)?;

        tracing::debug!(query = %query, map = %map_query, "request resolved");
        Ok(Resolution {
            query,
            resolution,
            map_query,
        })
    }

    /// Captures a spoken place name and resolves it like a typed one.
    ///
    /// # Errors
    ///
    /// - [`OrchestrationError::Voice`] when nothing usable was heard.
    /// - [`OrchestrationError::ServiceFailure`] for microphone faults and
    ///   failed lookups.
    /// - Anything [`Self::handle_text_query`] returns for the transcript.
    pub async fn handle_voice_query(&self) -> OrchestrationResult {
        let outcome = self
            .voice
            .capture(self.voice_timeout)
            .await
            .map_err(ServiceFailure::from)?;

        match outcome {
            VoiceCaptureOutcome::Transcribed(text) => {
                tracing::info!(transcript = %text, "voice query transcribed");
                self.handle_text_query(&text).await
            }
            VoiceCaptureOutcome::TimedOut => Err(VoiceFailure::Timeout.into()),
            VoiceCaptureOutcome::Unintelligible => Err(VoiceFailure::NotUnderstood.into()),
            VoiceCaptureOutcome::ServiceUnavailable => Err(VoiceFailure::Network.into()),
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
