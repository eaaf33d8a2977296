//! Voice input: microphone capture and speech-to-text.
//!
//! [`VoiceInputAdapter::capture`] opens the microphone, waits for a spoken
//! phrase, sends it to the speech service and classifies the answer as a
//! [`VoiceCaptureOutcome`].

pub mod adapter;
pub mod audio;
pub mod error;
pub mod listener;
pub mod microphone;
pub mod outcome;
pub mod speech;

pub use adapter::VoiceInputAdapter;
pub use audio::{AudioClip, FrameChunker, FRAME_DURATION};
pub use error::VoiceError;
pub use listener::{listen, Heard, ListenerSettings};
#[cfg(feature = "microphone")]
pub use microphone::CpalMicrophone;
pub use microphone::{AudioSession, Microphone};
pub use outcome::VoiceCaptureOutcome;
pub use speech::SpeechClient;
