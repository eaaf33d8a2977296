//! Request orchestration: typed or spoken input in, resolved place out.
//!
//! [`RequestOrchestrator`] is the only entry point the shell needs. It
//! validates the query, derives the map link, asks the encyclopedia
//! resolver and, for voice requests, runs the capture pipeline first.

pub mod error;
pub mod orchestrator;
pub mod ports;

pub use error::{OrchestrationError, ServiceFailure, VoiceFailure};
pub use orchestrator::{OrchestrationResult, RequestOrchestrator, Resolution};
pub use ports::{NoVoiceInput, PlaceResolver, VoiceInput};
