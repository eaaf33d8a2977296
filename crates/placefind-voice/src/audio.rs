//! Captured audio and its WAV encoding.

use std::io::Cursor;
use std::time::Duration;

use crate::error::VoiceError;

/// A mono, 16-bit PCM recording of one spoken phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl AudioClip {
    #[must_use]
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        samples_duration(self.samples.len(), self.sample_rate)
    }

    /// Encodes the clip as a WAV file in memory.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::Encode`] if `hound` rejects the header or a sample.
    pub fn to_wav(&self) -> Result<Vec<u8>, VoiceError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut bytes = Vec::with_capacity(44 + self.samples.len() * 2);
        {
            let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec)?;
            for &sample in &self.samples {
                writer.write_sample(sample)?;
            }
            writer.finalize()?;
        }
        Ok(bytes)
    }
}

/// Playback length of `len` samples at `sample_rate`.
#[must_use]
pub fn samples_duration(len: usize, sample_rate: u32) -> Duration {
    if sample_rate == 0 {
        return Duration::ZERO;
    }
    let len = u64::try_from(len).unwrap_or(u64::MAX);
    Duration::from_micros(len.saturating_mul(1_000_000) / u64::from(sample_rate))
}

/// Root-mean-square amplitude of a frame on the `i16` scale.
#[must_use]
pub fn rms(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples
        .iter()
        .map(|&s| {
            let s = f64::from(s);
            s * s
        })
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let len = samples.len() as f64;
    (sum / len).sqrt()
}

/// Length of the frames the listener works on.
pub const FRAME_DURATION: Duration = Duration::from_millis(30);

/// Re-slices sample buffers of whatever size the device delivers into
/// [`FRAME_DURATION`] frames. Leftover samples wait for the next buffer.
#[derive(Debug)]
pub struct FrameChunker {
    frame_len: usize,
    pending: Vec<i16>,
}

impl FrameChunker {
    #[must_use]
    pub fn new(sample_rate: u32) -> Self {
        let per_frame = u128::from(sample_rate) * FRAME_DURATION.as_millis() / 1_000;
        Self {
            frame_len: usize::try_from(per_frame).unwrap_or(usize::MAX).max(1),
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    pub fn push(&mut self, samples: &[i16]) {
        self.pending.extend_from_slice(samples);
    }

    /// Takes the next full frame, if one is buffered.
    pub fn next_frame(&mut self) -> Option<Vec<i16>> {
        if self.pending.len() < self.frame_len {
            return None;
        }
        let rest = self.pending.split_off(self.frame_len);
        Some(std::mem::replace(&mut self.pending, rest))
    }
}
