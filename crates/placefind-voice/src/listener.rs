//! Energy-based phrase detection over an open [`AudioSession`].
//!
//! The listener waits for the first frame louder than the energy threshold
//! (speech onset), then records until the speaker pauses or the phrase
//! limit is hit. Elapsed time is measured in captured audio, so a session
//! that delivers frames faster than real time still honours the window.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use placefind_core::AppConfig;

use crate::audio::{rms, samples_duration, AudioClip};
use crate::error::VoiceError;
use crate::microphone::AudioSession;

/// Audio kept from before onset so the first syllable is not clipped.
const PRE_ROLL: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct ListenerSettings {
    /// RMS on the `i16` scale above which a frame counts as speech.
    pub energy_threshold: f64,
    /// Trailing silence that ends a phrase.
    pub pause: Duration,
    /// Hard cap on phrase length once speech has started.
    pub phrase_limit: Duration,
}

impl Default for ListenerSettings {
    fn default() -> Self {
        Self {
            energy_threshold: 300.0,
            pause: Duration::from_millis(800),
            phrase_limit: Duration::from_secs(15),
        }
    }
}

impl ListenerSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            energy_threshold: f64::from(config.voice_energy_threshold),
            pause: Duration::from_millis(config.voice_pause_ms),
            phrase_limit: Duration::from_secs(config.voice_phrase_limit_secs),
        }
    }
}

/// What the listener heard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heard {
    Phrase(AudioClip),
    TimedOut,
}

/// Listens on `session` for one phrase.
///
/// Returns [`Heard::TimedOut`] if no frame crosses the energy threshold
/// within `timeout`, or if the device stops delivering frames before onset.
///
/// # Errors
///
/// Propagates stream errors from the session.
pub fn listen<S: AudioSession + ?Sized>(
    session: &mut S,
    timeout: Duration,
    settings: &ListenerSettings,
) -> Result<Heard, VoiceError> {
    let sample_rate = session.sample_rate();
    let deadline = Instant::now() + timeout;

    // Waiting for onset.
    let mut waited = Duration::ZERO;
    let mut pre_roll: VecDeque<Vec<i16>> = VecDeque::new();
    let mut pre_roll_len = Duration::ZERO;
    let mut phrase: Vec<i16> = loop {
        if waited >= timeout {
            tracing::debug!(?timeout, "no speech before timeout");
            return Ok(Heard::TimedOut);
        }
        let wait = deadline
            .saturating_duration_since(Instant::now())
            .max(Duration::from_millis(10));
        let Some(frame) = session.next_frame(wait)? else {
            tracing::debug!(?waited, "input went quiet before speech onset");
            return Ok(Heard::TimedOut);
        };

        let frame_len = samples_duration(frame.len(), sample_rate);
        waited += frame_len;

        if rms(&frame) > settings.energy_threshold {
            tracing::debug!(?waited, "speech onset");
            let mut phrase: Vec<i16> = pre_roll.into_iter().flatten().collect();
            phrase.extend_from_slice(&frame);
            break phrase;
        }

        pre_roll_len += frame_len;
        pre_roll.push_back(frame);
        while pre_roll_len > PRE_ROLL {
            let Some(dropped) = pre_roll.pop_front() else {
                break;
            };
            pre_roll_len = pre_roll_len.saturating_sub(samples_duration(dropped.len(), sample_rate));
        }
    };

    // Recording until the speaker pauses.
    let mut spoken = Duration::ZERO;
    let mut silence = Duration::ZERO;
    loop {
        if silence >= settings.pause {
            tracing::debug!(?spoken, "phrase ended on pause");
            break;
        }
        if spoken >= settings.phrase_limit {
            tracing::debug!(?spoken, "phrase hit length limit");
            break;
        }
        let Some(frame) = session.next_frame(settings.pause)? else {
            tracing::debug!(?spoken, "input went quiet mid-phrase");
            break;
        };

        let frame_len = samples_duration(frame.len(), sample_rate);
        spoken += frame_len;
        if rms(&frame) > settings.energy_threshold {
            silence = Duration::ZERO;
        } else {
            silence += frame_len;
        }
        phrase.extend_from_slice(&frame);
    }

    Ok(Heard::Phrase(AudioClip::new(phrase, sample_rate)))
}
