//! Built-in sounds.
//!
//! The default alarm plays when no alarm has been uploaded; the default
//! reset sound plays on every manual reset until the user supplies one.
//! Both are sine tones synthesized by the player, so no audio assets are
//! compiled into the binary.

use super::source::SoundSource;

/// Frequency of the default alarm tone (A5).
pub const DEFAULT_ALARM_FREQUENCY_HZ: u32 = 880;

/// Length of the default alarm tone.
pub const DEFAULT_ALARM_DURATION_MS: u64 = 1200;

/// Frequency of the default reset tone (E6).
pub const DEFAULT_RESET_FREQUENCY_HZ: u32 = 1319;

/// Length of the default reset tone.
pub const DEFAULT_RESET_DURATION_MS: u64 = 120;

/// Returns the alarm played when the alarm list is empty.
#[must_use]
pub fn default_alarm_sound() -> SoundSource {
    SoundSource::tone(
        "default alarm",
        DEFAULT_ALARM_FREQUENCY_HZ,
        DEFAULT_ALARM_DURATION_MS,
    )
}

/// Returns the sound played on manual reset.
#[must_use]
pub fn default_reset_sound() -> SoundSource {
    SoundSource::tone(
        "default reset",
        DEFAULT_RESET_FREQUENCY_HZ,
        DEFAULT_RESET_DURATION_MS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alarm_is_tone() {
        let source = default_alarm_sound();
        assert!(source.is_tone());
        assert_eq!(source.name(), "default alarm");
    }

    #[test]
    fn test_reset_sound_differs_from_alarm() {
        assert_ne!(default_alarm_sound(), default_reset_sound());
        assert!(DEFAULT_RESET_DURATION_MS < DEFAULT_ALARM_DURATION_MS);
    }
}
