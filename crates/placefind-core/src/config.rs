use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_SPEECH_API_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("PLACEFIND_LOG_LEVEL", "warn");

    let wiki_language = parse_language(
        "PLACEFIND_WIKI_LANGUAGE",
        &or_default("PLACEFIND_WIKI_LANGUAGE", "en"),
    )?;
    let wiki_api_url = lookup("PLACEFIND_WIKI_API_URL")
        .unwrap_or_else(|_| format!("https://{wiki_language}.wikipedia.org/w/api.php"));
    let wiki_rate_limit_ms = parse_u64("PLACEFIND_WIKI_RATE_LIMIT_MS", "50")?;
    let http_timeout_secs = parse_u64("PLACEFIND_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PLACEFIND_USER_AGENT", "placefind/0.1 (place-lookup)");

    let speech_api_key = lookup("PLACEFIND_SPEECH_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let speech_api_url = or_default("PLACEFIND_SPEECH_API_URL", DEFAULT_SPEECH_API_URL);
    let speech_language = parse_language(
        "PLACEFIND_SPEECH_LANGUAGE",
        &or_default("PLACEFIND_SPEECH_LANGUAGE", "en-US"),
    )?;

    let parse_nonzero_u64 =
        |var: &str, default: &str, unit: &str| -> Result<u64, ConfigError> {
            let value = parse_u64(var, default)?;
            if value == 0 {
                return Err(ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: format!("must be at least 1 {unit}"),
                });
            }
            Ok(value)
        };

    let voice_timeout_secs = parse_nonzero_u64("PLACEFIND_VOICE_TIMEOUT_SECS", "5", "second")?;
    let voice_phrase_limit_secs =
        parse_nonzero_u64("PLACEFIND_VOICE_PHRASE_LIMIT_SECS", "15", "second")?;
    let voice_energy_threshold = parse_u32("PLACEFIND_VOICE_ENERGY_THRESHOLD", "300")?;
    let voice_pause_ms = parse_nonzero_u64("PLACEFIND_VOICE_PAUSE_MS", "800", "millisecond")?;

    Ok(AppConfig {
        log_level,
        wiki_language,
        wiki_api_url,
        wiki_rate_limit_ms,
        http_timeout_secs,
        user_agent,
        speech_api_key,
        speech_api_url,
        speech_language,
        voice_timeout_secs,
        voice_phrase_limit_secs,
        voice_energy_threshold,
        voice_pause_ms,
    })
}

/// Accepts language codes such as `en`, `de` or `en-US`.
fn parse_language(var: &str, raw: &str) -> Result<String, ConfigError> {
    let code = raw.trim();
    let valid = !code.is_empty()
        && !code.starts_with('-')
        && !code.ends_with('-')
        && code.chars().all(|c| c.is_ascii_alphabetic() || c == '-');
    if valid {
        Ok(code.to_string())
    } else {
        Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("\"{raw}\" is not a language code"),
        })
    }
}
