use std::time::Duration;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub wiki_language: String,
    pub wiki_api_url: String,
    pub wiki_rate_limit_ms: u64,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub speech_api_key: Option<String>,
    pub speech_api_url: String,
    pub speech_language: String,
    pub voice_timeout_secs: u64,
    pub voice_phrase_limit_secs: u64,
    pub voice_energy_threshold: u32,
    pub voice_pause_ms: u64,
}

impl AppConfig {
    /// Window in which speech must start before a capture times out.
    #[must_use]
    pub fn voice_timeout(&self) -> Duration {
        Duration::from_secs(self.voice_timeout_secs)
    }

    /// Minimum spacing between encyclopedia requests, or `None` when
    /// rate limiting is disabled.
    #[must_use]
    pub fn wiki_rate_limit(&self) -> Option<Duration> {
        (self.wiki_rate_limit_ms > 0).then(|| Duration::from_millis(self.wiki_rate_limit_ms))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("wiki_language", &self.wiki_language)
            .field("wiki_api_url", &self.wiki_api_url)
            .field("wiki_rate_limit_ms", &self.wiki_rate_limit_ms)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "speech_api_key",
                &self.speech_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("speech_api_url", &self.speech_api_url)
            .field("speech_language", &self.speech_language)
            .field("voice_timeout_secs", &self.voice_timeout_secs)
            .field("voice_phrase_limit_secs", &self.voice_phrase_limit_secs)
            .field("voice_energy_threshold", &self.voice_energy_threshold)
            .field("voice_pause_ms", &self.voice_pause_ms)
            .finish()
    }
}
