//! Sound player implementation using rodio.
//!
//! This module provides the `RodioSoundPlayer` which uses the rodio v0.20
//! audio library for cross-platform sound playback.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::debug;

use super::error::SoundError;
use super::source::{SoundHandle, SoundSource};

/// Volume applied to synthesized tones.
const TONE_AMPLITUDE: f32 = 0.25;

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking; sounds continue playing in the background.
/// The output stream is not `Send`, so the player lives on the thread that
/// created it.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Creates a new sound player on the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a sound to completion in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if the audio cannot be decoded or the sink cannot
    /// be created.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        let sink = self.start(source)?;
        sink.detach();

        debug!("Sound playback started (detached): {}", source.name());
        Ok(())
    }

    /// Plays the first `duration` of a sound, then stops it.
    ///
    /// # Errors
    ///
    /// Returns an error if the audio cannot be decoded or the sink cannot
    /// be created.
    pub fn preview(&self, source: &SoundSource, duration: Duration) -> Result<(), SoundError> {
        let sink = self.start(source)?;

        std::thread::spawn(move || {
            std::thread::sleep(duration);
            sink.stop();
        });

        debug!("Sound preview started for {:?}: {}", duration, source.name());
        Ok(())
    }

    /// Creates a sink already playing the given source.
    fn start(&self, source: &SoundSource) -> Result<Sink, SoundError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        match source {
            SoundSource::Tone {
                frequency_hz,
                duration_ms,
                ..
            } => {
                let tone = SineWave::new(*frequency_hz as f32)
                    .take_duration(Duration::from_millis(*duration_ms))
                    .amplify(TONE_AMPLITUDE);
                sink.append(tone);
            }
            SoundSource::Uploaded(handle) => {
                sink.append(decode(handle)?);
            }
        }

        Ok(sink)
    }

    /// Returns true if the audio system is available.
    ///
    /// This always returns true if the player was successfully created,
    /// as the audio stream is initialized during construction.
    #[must_use]
    pub fn is_available(&self) -> bool {
        true
    }
}

/// Decodes uploaded bytes without copying them.
fn decode(handle: &SoundHandle) -> Result<Decoder<Cursor<Arc<[u8]>>>, SoundError> {
    Decoder::new(Cursor::new(handle.data()))
        .map_err(|e| SoundError::DecodeError(format!("{}: {}", handle.file_name(), e)))
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            tracing::warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}
