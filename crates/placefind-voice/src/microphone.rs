//! Microphone access as a scoped resource.
//!
//! [`Microphone::open`] acquires the input device and returns an
//! [`AudioSession`]; dropping the session releases the device. The session
//! is created, used and dropped on the capture worker thread, so it does
//! not need to be `Send`.

use std::time::Duration;

use crate::error::VoiceError;

/// An open input stream delivering mono `i16` frames.
pub trait AudioSession {
    fn sample_rate(&self) -> u32;

    /// Blocks for up to `wait` for the next chunk of samples.
    ///
    /// Returns `Ok(None)` if nothing arrived in time.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::Stream`] if the underlying stream failed.
    fn next_frame(&mut self, wait: Duration) -> Result<Option<Vec<i16>>, VoiceError>;
}

/// Source of audio sessions, typically the default input device.
pub trait Microphone: Send + Sync + 'static {
    type Session: AudioSession;

    /// Acquires the device for exclusive use until the session is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::NoInputDevice`] or [`VoiceError::Device`] if
    /// the device cannot be opened.
    fn open(&self) -> Result<Self::Session, VoiceError>;
}

#[cfg(feature = "microphone")]
pub use self::cpal_backend::{CpalMicrophone, CpalSession};

#[cfg(feature = "microphone")]
mod cpal_backend {
    use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
    use std::time::{Duration, Instant};

    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

    use super::{AudioSession, Microphone};
    use crate::audio::FrameChunker;
    use crate::error::VoiceError;

    enum StreamEvent {
        Samples(Vec<i16>),
        Error(String),
    }

    /// The host's default input device.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct CpalMicrophone;

    /// A running cpal input stream. Dropping it stops the stream.
    ///
    /// Device buffers arrive at whatever size the host picks; the session
    /// hands them out as 30 ms frames.
    pub struct CpalSession {
        _stream: cpal::Stream,
        receiver: Receiver<StreamEvent>,
        chunker: FrameChunker,
        sample_rate: u32,
    }

    impl Microphone for CpalMicrophone {
        type Session = CpalSession;

        fn open(&self) -> Result<CpalSession, VoiceError> {
            let host = cpal::default_host();
            let device = host
                .default_input_device()
                .ok_or(VoiceError::NoInputDevice)?;

            tracing::info!(
                device = %device.name().unwrap_or_default(),
                "opening input device"
            );

            let supported = device
                .default_input_config()
                .map_err(|e| VoiceError::Device(e.to_string()))?;
            let sample_format = supported.sample_format();
            let config: cpal::StreamConfig = supported.into();
            let channels = usize::from(config.channels.max(1));
            let sample_rate = config.sample_rate.0;

            let (sender, receiver) = mpsc::channel();
            let err_sender = sender.clone();
            let on_error = move |err: cpal::StreamError| {
                let _ = err_sender.send(StreamEvent::Error(err.to_string()));
            };

            let stream = match sample_format {
                cpal::SampleFormat::F32 => device.build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        forward(&sender, data, channels, f32_to_i16);
                    },
                    on_error,
                    None,
                ),
                cpal::SampleFormat::I16 => device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        forward(&sender, data, channels, |s| s);
                    },
                    on_error,
                    None,
                ),
                cpal::SampleFormat::U16 => device.build_input_stream(
                    &config,
                    move |data: &[u16], _: &cpal::InputCallbackInfo| {
                        forward(&sender, data, channels, u16_to_i16);
                    },
                    on_error,
                    None,
                ),
                other => {
                    return Err(VoiceError::Device(format!(
                        "unsupported sample format: {other:?}"
                    )))
                }
            }
            .map_err(|e| VoiceError::Device(e.to_string()))?;

            stream
                .play()
                .map_err(|e| VoiceError::Device(e.to_string()))?;

            tracing::debug!(sample_rate, channels, "input stream started");
            Ok(CpalSession {
                _stream: stream,
                receiver,
                chunker: FrameChunker::new(sample_rate),
                sample_rate,
            })
        }
    }

    impl AudioSession for CpalSession {
        fn sample_rate(&self) -> u32 {
            self.sample_rate
        }

        fn next_frame(&mut self, wait: Duration) -> Result<Option<Vec<i16>>, VoiceError> {
            let deadline = Instant::now() + wait;
            loop {
                if let Some(frame) = self.chunker.next_frame() {
                    return Ok(Some(frame));
                }
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Ok(None);
                }
                match self.receiver.recv_timeout(remaining) {
                    Ok(StreamEvent::Samples(samples)) => self.chunker.push(&samples),
                    Ok(StreamEvent::Error(message)) => return Err(VoiceError::Stream(message)),
                    Err(RecvTimeoutError::Timeout) => return Ok(None),
                    Err(RecvTimeoutError::Disconnected) => {
                        return Err(VoiceError::Stream("input stream closed".to_owned()))
                    }
                }
            }
        }
    }

    impl Drop for CpalSession {
        fn drop(&mut self) {
            tracing::debug!("releasing input device");
        }
    }

    /// Downmixes interleaved samples to mono and sends them to the listener.
    fn forward<T: Copy>(
        sender: &Sender<StreamEvent>,
        data: &[T],
        channels: usize,
        convert: impl Fn(T) -> i16,
    ) {
        let mono = data
            .chunks(channels)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| i32::from(convert(s))).sum();
                let avg = sum / i32::try_from(frame.len()).unwrap_or(1);
                i16::try_from(avg).unwrap_or(if avg < 0 { i16::MIN } else { i16::MAX })
            })
            .collect();
        // The receiver is gone once the session is dropped; late callbacks
        // have nowhere to go.
        let _ = sender.send(StreamEvent::Samples(mono));
    }

    #[allow(clippy::cast_possible_truncation)]
    fn f32_to_i16(sample: f32) -> i16 {
        (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn u16_to_i16(sample: u16) -> i16 {
        (i32::from(sample) - 32_768) as i16
    }

}
