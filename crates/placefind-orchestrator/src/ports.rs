//! Seams between the orchestrator and its two leaves.
//!
//! Production code plugs in [`placefind_wiki::Resolver`] and
//! [`placefind_voice::VoiceInputAdapter`]; tests plug in recording fakes.

use std::time::Duration;

use async_trait::async_trait;
use placefind_core::{Query, ResolutionResult};
use placefind_voice::{Microphone, VoiceCaptureOutcome, VoiceError, VoiceInputAdapter};
use placefind_wiki::{Resolver, WikiError};

/// Looks a place name up in the encyclopedia.
#[async_trait]
pub trait PlaceResolver: Send + Sync {
    async fn resolve(&self, query: &Query) -> Result<ResolutionResult, WikiError>;
}

/// Captures one spoken phrase and transcribes it.
#[async_trait]
pub trait VoiceInput: Send + Sync {
    async fn capture(&self, timeout: Duration) -> Result<VoiceCaptureOutcome, VoiceError>;
}

#[async_trait]
impl PlaceResolver for Resolver {
    async fn resolve(&self, query: &Query) -> Result<ResolutionResult, WikiError> {
        Resolver::resolve(self, query).await
    }
}

#[async_trait]
impl<M: Microphone> VoiceInput for VoiceInputAdapter<M> {
    async fn capture(&self, timeout: Duration) -> Result<VoiceCaptureOutcome, VoiceError> {
        VoiceInputAdapter::capture(self, timeout).await
    }
}

/// Voice input for shells that only take typed queries.
///
/// Behaves like a machine with no microphone attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVoiceInput;

#[async_trait]
impl VoiceInput for NoVoiceInput {
    async fn capture(&self, _timeout: Duration) -> Result<VoiceCaptureOutcome, VoiceError> {
        Err(VoiceError::NoInputDevice)
    }
}
