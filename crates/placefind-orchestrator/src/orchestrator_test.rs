use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use placefind_core::{InputError, Query, ResolutionResult};
use placefind_voice::{VoiceCaptureOutcome, VoiceError};
use placefind_wiki::WikiError;

use super::*;

type ResolveFn = dyn Fn(&Query) -> Result<ResolutionResult, WikiError> + Send + Sync;
type CaptureFn = dyn Fn() -> Result<VoiceCaptureOutcome, VoiceError> + Send + Sync;

struct FakeResolver {
    reply: Box<ResolveFn>,
    calls: Mutex<Vec<String>>,
}

impl FakeResolver {
    fn new(
        reply: impl Fn(&Query) -> Result<ResolutionResult, WikiError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers every query with a `Found` page titled after the query.
    fn echoing() -> Self {
        Self::new(|q| {
            Ok(ResolutionResult::Found {
                title: q.as_str().to_owned(),
                summary: format!("{q} is a place."),
                article_url: format!("https://en.wikipedia.org/wiki/{q}"),
            })
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceResolver for FakeResolver {
    async fn resolve(&self, query: &Query) -> Result<ResolutionResult, WikiError> {
        self.calls.lock().unwrap().push(query.as_str().to_owned());
        (self.reply)(query)
    }
}

struct FakeVoice {
    reply: Box<CaptureFn>,
    timeouts: Mutex<Vec<Duration>>,
}

impl FakeVoice {
    fn new(
        reply: impl Fn() -> Result<VoiceCaptureOutcome, VoiceError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Box::new(reply),
            timeouts: Mutex::new(Vec::new()),
        }
    }

    fn hearing(outcome: VoiceCaptureOutcome) -> Self {
        Self::new(move || Ok(outcome.clone()))
    }
}

#[async_trait]
impl VoiceInput for FakeVoice {
    async fn capture(&self, timeout: Duration) -> Result<VoiceCaptureOutcome, VoiceError> {
        self.timeouts.lock().unwrap().push(timeout);
        (self.reply)()
    }
}

fn orchestrator(voice: FakeVoice) -> RequestOrchestrator<FakeResolver, FakeVoice> {
    RequestOrchestrator::new(FakeResolver::echoing(), voice, Duration::from_secs(5))
}

// ---------------------------------------------------------------------------
// handle_text_query
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blank_input_is_rejected_before_resolver() {
    let orch = orchestrator(FakeVoice::hearing(VoiceCaptureOutcome::TimedOut));

    for raw in ["", "   ", "\t\n"] {
        let result = orch.handle_text_query(raw).await;
        assert!(
            matches!(result, Err(OrchestrationError::Input(InputError::EmptyQuery))),
            "expected EmptyQuery, got: {result:?}"
        );
    }
    assert!(orch.resolver.calls().is_empty());
}

#[tokio::test]
async fn text_query_is_trimmed_and_mapped() {
    let orch = orchestrator(FakeVoice::hearing(VoiceCaptureOutcome::TimedOut));

    let resolution = orch.handle_text_query("  New York City ").await.unwrap();

    assert_eq!(resolution.query.as_str(), "New York City");
    assert_eq!(
        resolution.map_query.as_str(),
        "https://www.google.com/maps/search/?api=1&query=New+York+City"
    );
    assert_eq!(orch.resolver.calls(), vec!["New York City".to_owned()]);
}

#[tokio::test]
async fn map_query_is_present_when_place_is_not_found() {
    let orch = RequestOrchestrator::new(
        FakeResolver::new(|_| Ok(ResolutionResult::NotFound)),
        FakeVoice::hearing(VoiceCaptureOutcome::TimedOut),
        Duration::from_secs(5),
    );

    let resolution = orch.handle_text_query("Atlantis").await.unwrap();

    assert_eq!(resolution.resolution, ResolutionResult::NotFound);
    assert!(resolution.map_query.as_str().ends_with("query=Atlantis"));
}

#[tokio::test]
async fn ambiguous_result_is_passed_through() {
    let orch = RequestOrchestrator::new(
        FakeResolver::new(|_| {
            Ok(ResolutionResult::Ambiguous {
                candidates: vec!["Paris".to_owned(), "Paris, Texas".to_owned()],
            })
        }),
        FakeVoice::hearing(VoiceCaptureOutcome::TimedOut),
        Duration::from_secs(5),
    );

    let resolution = orch.handle_text_query("Paris").await.unwrap();

    assert_eq!(
        resolution.resolution,
        ResolutionResult::Ambiguous {
            candidates: vec!["Paris".to_owned(), "Paris, Texas".to_owned()],
        }
    );
}

#[tokio::test]
async fn resolver_failure_becomes_service_failure() {
    let orch = RequestOrchestrator::new(
        FakeResolver::new(|_| {
            Err(WikiError::Api {
                code: "maxlag".to_owned(),
                info: "Waiting for a database server".to_owned(),
            })
        }),
        FakeVoice::hearing(VoiceCaptureOutcome::TimedOut),
        Duration::from_secs(5),
    );

    let result = orch.handle_text_query("Oslo").await;

    let Err(err) = result else {
        panic!("expected a service failure");
    };
    assert!(!err.is_recoverable());
    assert!(
        matches!(
            err,
            OrchestrationError::ServiceFailure(ServiceFailure::Lookup(WikiError::Api { .. }))
        ),
        "expected Lookup(Api), got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// handle_voice_query
// ---------------------------------------------------------------------------

#[tokio::test]
async fn voice_query_matches_text_query() {
    let orch = orchestrator(FakeVoice::hearing(VoiceCaptureOutcome::Transcribed(
        "Paris".to_owned(),
    )));

    let spoken = orch.handle_voice_query().await.unwrap();
    let typed = orch.handle_text_query("Paris").await.unwrap();

    assert_eq!(spoken, typed);
    assert_eq!(spoken.query.as_str(), "Paris");
    assert_eq!(
        orch.resolver.calls(),
        vec!["Paris".to_owned(), "Paris".to_owned()]
    );
}

#[tokio::test]
async fn voice_query_uses_configured_window() {
    let orch = RequestOrchestrator::new(
        FakeResolver::echoing(),
        FakeVoice::hearing(VoiceCaptureOutcome::TimedOut),
        Duration::from_secs(8),
    );

    let _ = orch.handle_voice_query().await;

    assert_eq!(
        *orch.voice.timeouts.lock().unwrap(),
        vec![Duration::from_secs(8)]
    );
}

#[tokio::test]
async fn voice_outcomes_map_to_voice_failures() {
    let cases = [
        (VoiceCaptureOutcome::TimedOut, VoiceFailure::Timeout),
        (VoiceCaptureOutcome::Unintelligible, VoiceFailure::NotUnderstood),
        (VoiceCaptureOutcome::ServiceUnavailable, VoiceFailure::Network),
    ];

    for (outcome, expected) in cases {
        let orch = orchestrator(FakeVoice::hearing(outcome.clone()));
        let result = orch.handle_voice_query().await;
        match result {
            Err(OrchestrationError::Voice(kind)) => assert_eq!(kind, expected),
            other => panic!("{outcome:?}: expected Voice({expected:?}), got: {other:?}"),
        }
        assert!(orch.resolver.calls().is_empty());
    }
}

#[tokio::test]
async fn microphone_fault_becomes_service_failure() {
    let orch = orchestrator(FakeVoice::new(|| Err(VoiceError::NoInputDevice)));

    let result = orch.handle_voice_query().await;

    assert!(
        matches!(
            result,
            Err(OrchestrationError::ServiceFailure(ServiceFailure::Capture(
                VoiceError::NoInputDevice
            )))
        ),
        "expected Capture(NoInputDevice), got: {result:?}"
    );
}

#[tokio::test]
async fn text_only_orchestrator_has_no_microphone() {
    let orch = RequestOrchestrator::text_only(FakeResolver::echoing());

    assert!(orch.handle_text_query("Lima").await.is_ok());
    assert!(matches!(
        orch.handle_voice_query().await,
        Err(OrchestrationError::ServiceFailure(ServiceFailure::Capture(
            VoiceError::NoInputDevice
        )))
    ));
}

#[test]
fn resolution_serializes_for_json_output() {
    let query = Query::parse("NYC").unwrap();
    let resolution = Resolution {
        map_query: placefind_core::derive_map_query(&query),
        query,
        resolution: ResolutionResult::NotFound,
    };

    let json = serde_json::to_value(&resolution).unwrap();

    assert_eq!(json["query"], "NYC");
    assert_eq!(json["resolution"]["kind"], "not_found");
    assert_eq!(
        json["map_query"],
        "https://www.google.com/maps/search/?api=1&query=NYC"
    );
}
