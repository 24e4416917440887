//! Sound loading and playback for the alarm timer.
//!
//! This module provides:
//!
//! - Validation of user-supplied audio files (`load_audio_resource`)
//! - Built-in default alarm and reset tones
//! - Non-blocking playback and time-limited previews
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │   AudioUpload    │────▶│   SoundHandle    │  (MIME check)
//! └──────────────────┘     └────────┬─────────┘
//!                                   ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ Built-in tones   │────▶│   SoundSource    │
//! └──────────────────┘     └────────┬─────────┘
//!                                   ▼
//!                          ┌──────────────────┐
//!                          │   SoundPlayer    │ ← rodio / mock
//!                          └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use alarm_timer::sound::{default_alarm_sound, RodioSoundPlayer};
//!
//! let player = RodioSoundPlayer::new().expect("audio init");
//! player.play(&default_alarm_sound()).expect("playback failed");
//! ```

mod embedded;
mod error;
mod loader;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub use embedded::{default_alarm_sound, default_reset_sound};
pub use error::SoundError;
pub use loader::{guess_mime_type, load_audio_resource, AudioUpload};
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{SoundHandle, SoundSource};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound from the given source.
    ///
    /// This method should be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Plays at most `duration` of a sound.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn preview(&self, source: &SoundSource, duration: Duration) -> Result<(), SoundError>;

    /// Returns true if the audio system is available.
    fn is_available(&self) -> bool;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn preview(&self, source: &SoundSource, duration: Duration) -> Result<(), SoundError> {
        RodioSoundPlayer::preview(self, source, duration)
    }

    fn is_available(&self) -> bool {
        RodioSoundPlayer::is_available(self)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    preview_calls: Mutex<Vec<(SoundSource, Duration)>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn get_preview_calls(&self) -> Vec<(SoundSource, Duration)> {
        self.preview_calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.play_calls.lock().unwrap().clear();
        self.preview_calls.lock().unwrap().clear();
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::DecodeError("Mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn preview(&self, source: &SoundSource, duration: Duration) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::DecodeError("Mock failure".to_string()));
        }
        self.preview_calls
            .lock()
            .unwrap()
            .push((source.clone(), duration));
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let _: fn() -> Result<RodioSoundPlayer, SoundError> = RodioSoundPlayer::new;
        let _: fn() -> SoundSource = default_alarm_sound;
        let _: fn() -> SoundSource = default_reset_sound;
        let _: fn(AudioUpload) -> Result<SoundHandle, SoundError> = load_audio_resource;
    }

    #[test]
    fn test_mock_records_calls() {
        let mock = MockSoundPlayer::new();
        mock.play(&default_alarm_sound()).unwrap();
        mock.preview(&default_reset_sound(), Duration::from_millis(1000))
            .unwrap();

        assert_eq!(mock.play_count(), 1);
        assert_eq!(mock.get_play_calls()[0], default_alarm_sound());
        assert_eq!(
            mock.get_preview_calls(),
            vec![(default_reset_sound(), Duration::from_millis(1000))]
        );

        mock.clear_calls();
        assert_eq!(mock.play_count(), 0);
        assert!(mock.get_preview_calls().is_empty());
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockSoundPlayer::new();
        mock.set_should_fail(true);

        assert!(mock.play(&default_alarm_sound()).is_err());
        assert!(mock
            .preview(&default_alarm_sound(), Duration::from_secs(1))
            .is_err());
        assert_eq!(mock.play_count(), 0);
    }
}
