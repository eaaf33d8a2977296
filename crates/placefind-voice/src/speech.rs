//! HTTP client for the Google Cloud Speech-to-Text v1 `speech:recognize`
//! endpoint.
//!
//! One synchronous recognition request per clip; the audio travels inline
//! as a base64-encoded WAV file.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use placefind_core::AppConfig;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::audio::AudioClip;
use crate::error::VoiceError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'a str,
    max_alternatives: u32,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<SpeechResult>,
}

#[derive(Debug, Deserialize)]
struct SpeechResult {
    #[serde(default)]
    alternatives: Vec<SpeechAlternative>,
}

#[derive(Debug, Deserialize)]
struct SpeechAlternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    confidence: Option<f32>,
}

/// Client for the speech recognition service.
pub struct SpeechClient {
    client: Client,
    api_url: Url,
    api_key: Option<String>,
    language: String,
}

impl SpeechClient {
    /// Creates a client for `api_url` recognising `language` (e.g. `en-US`).
    ///
    /// A missing `api_key` is allowed here; [`SpeechClient::recognize`]
    /// reports it as [`VoiceError::MissingApiKey`] without touching the
    /// network.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`VoiceError::InvalidApiUrl`] if `api_url`
    /// does not parse.
    pub fn new(
        api_url: &str,
        api_key: Option<String>,
        language: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, VoiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let api_url = Url::parse(api_url).map_err(|e| VoiceError::InvalidApiUrl {
            url: api_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_url,
            api_key,
            language: language.to_owned(),
        })
    }

    /// Builds a client from the process-wide configuration.
    ///
    /// # Errors
    ///
    /// See [`SpeechClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, VoiceError> {
        Self::new(
            &config.speech_api_url,
            config.speech_api_key.clone(),
            &config.speech_language,
            config.http_timeout_secs,
            &config.user_agent,
        )
    }

    /// `false` when [`SpeechClient::recognize`] would fail with
    /// [`VoiceError::MissingApiKey`].
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Transcribes `clip`.
    ///
    /// Returns `Ok(None)` when the service found no recognisable speech.
    /// Otherwise the top alternative of the first result, verbatim.
    ///
    /// # Errors
    ///
    /// - [`VoiceError::MissingApiKey`] if no key is configured.
    /// - [`VoiceError::Http`] on network failure or non-2xx HTTP status.
    /// - [`VoiceError::Deserialize`] if the response is not the expected JSON.
    /// - [`VoiceError::Encode`] if the clip cannot be encoded.
    pub async fn recognize(&self, clip: &AudioClip) -> Result<Option<String>, VoiceError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(VoiceError::MissingApiKey);
        };

        let wav = clip.to_wav()?;
        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: clip.sample_rate,
                language_code: &self.language,
                max_alternatives: 1,
            },
            audio: RecognitionAudio {
                content: STANDARD.encode(&wav),
            },
        };

        let mut url = self.api_url.clone();
        url.query_pairs_mut().append_pair("key", api_key);

        tracing::debug!(
            audio_ms = u64::try_from(clip.duration().as_millis()).unwrap_or(u64::MAX),
            bytes = wav.len(),
            "sending speech recognition request"
        );
        let response = self.client.post(url).json(&request).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: RecognizeResponse = if body.trim().is_empty() {
            RecognizeResponse::default()
        } else {
            serde_json::from_str(&body).map_err(|e| VoiceError::Deserialize {
                context: "speech:recognize".to_owned(),
                source: e,
            })?
        };

        let best = parsed
            .results
            .into_iter()
            .next()
            .and_then(|result| result.alternatives.into_iter().next());

        match best {
            Some(alt) if !alt.transcript.trim().is_empty() => {
                tracing::info!(confidence = ?alt.confidence, "speech recognised");
                Ok(Some(alt.transcript))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_in_camel_case() {
        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: 16_000,
                language_code: "en-US",
                max_alternatives: 1,
            },
            audio: RecognitionAudio {
                content: "AAAA".to_owned(),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "config": {
                    "encoding": "LINEAR16",
                    "sampleRateHertz": 16000,
                    "languageCode": "en-US",
                    "maxAlternatives": 1
                },
                "audio": { "content": "AAAA" }
            })
        );
    }

    #[test]
    fn new_rejects_unparseable_api_url() {
        let result = SpeechClient::new("::not-a-url", None, "en-US", 5, "placefind-test/0.1");
        assert!(matches!(result, Err(VoiceError::InvalidApiUrl { .. })));
    }
}
