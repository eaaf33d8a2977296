//! Text and JSON output for orchestration results.

use std::process::ExitCode;

use placefind_core::ResolutionResult;
use placefind_orchestrator::{
    OrchestrationError, OrchestrationResult, Resolution, ServiceFailure, VoiceFailure,
};

const NOT_FOUND: &str = "Sorry, no information found for the place.";
const AMBIGUOUS: &str = "Ambiguous query; multiple results found:";

/// Prints `result` and picks the process exit code.
///
/// Results go to stdout; in text mode errors go to stderr. `NotFound` and
/// `Ambiguous` are answers, not failures.
pub(crate) fn report(
    result: &OrchestrationResult,
    json: bool,
    spoken: bool,
) -> anyhow::Result<ExitCode> {
    if json {
        println!("{}", render_json(result)?);
    } else {
        match result {
            Ok(resolution) => print!("{}", render_resolution(resolution, spoken)),
            Err(err) => eprintln!("{}", render_error(err)),
        }
    }

    if let Err(err) = result {
        tracing::debug!(error = %err, recoverable = err.is_recoverable(), "request failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn render_resolution(resolution: &Resolution, spoken: bool) -> String {
    let mut out = String::new();
    if spoken {
        out.push_str(&format!("Heard: {}\n", resolution.query));
    }

    match &resolution.resolution {
        ResolutionResult::Found {
            title,
            summary,
            article_url,
        } => {
            out.push_str(&format!("{title}\n\n{summary}\n\nArticle: {article_url}\n"));
        }
        ResolutionResult::Ambiguous { candidates } => {
            out.push_str(AMBIGUOUS);
            out.push('\n');
            for candidate in candidates {
                out.push_str(&format!("  {candidate}\n"));
            }
        }
        ResolutionResult::NotFound => {
            out.push_str(NOT_FOUND);
            out.push('\n');
        }
    }

    out.push_str(&format!("Map: {}\n", resolution.map_query));
    out
}

pub(crate) fn render_error(err: &OrchestrationError) -> String {
    match err {
        OrchestrationError::Input(_) => "Please enter a place name.".to_owned(),
        OrchestrationError::Voice(VoiceFailure::Timeout) => "Listening timed out.".to_owned(),
        OrchestrationError::Voice(VoiceFailure::NotUnderstood) => {
            "Could not understand the audio.".to_owned()
        }
        OrchestrationError::Voice(VoiceFailure::Network) => {
            "Could not request results; check your network connection.".to_owned()
        }
        OrchestrationError::ServiceFailure(ServiceFailure::Lookup(cause)) => {
            format!("Lookup failed: {cause}")
        }
        OrchestrationError::ServiceFailure(ServiceFailure::Capture(cause)) => {
            format!("Voice capture failed: {cause}")
        }
    }
}

fn error_kind(err: &OrchestrationError) -> &'static str {
    match err {
        OrchestrationError::Input(_) => "input",
        OrchestrationError::Voice(VoiceFailure::Timeout) => "voice_timeout",
        OrchestrationError::Voice(VoiceFailure::NotUnderstood) => "voice_not_understood",
        OrchestrationError::Voice(VoiceFailure::Network) => "voice_network",
        OrchestrationError::ServiceFailure(_) => "service_failure",
    }
}

pub(crate) fn render_json(result: &OrchestrationResult) -> serde_json::Result<String> {
    let value = match result {
        Ok(resolution) => serde_json::to_value(resolution)?,
        Err(err) => serde_json::json!({
            "error": {
                "kind": error_kind(err),
                "message": render_error(err),
            }
        }),
    };
    serde_json::to_string_pretty(&value)
}

pub(crate) fn about_text() -> String {
    format!(
        "placefind {version}\n\
         Wikipedia place search with Google Maps links.\n\
         \n\
         Usage:\n\
         \x20 1. Run `placefind search <PLACE>` with the name of a place,\n\
         \x20    or `placefind listen` and say it into the microphone.\n\
         \x20 2. A short Wikipedia summary and the article link are printed.\n\
         \x20 3. Open the `Map:` link to see the place on Google Maps.\n\
         \n\
         Voice input needs a build with `--features microphone` and\n\
         PLACEFIND_SPEECH_API_KEY set to a Google Cloud Speech-to-Text key.",
        version = env!("CARGO_PKG_VERSION"),
    )
}
