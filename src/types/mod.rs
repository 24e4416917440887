//! Core data types for the alarm timer.
//!
//! This module defines the data structures used for:
//! - Countdown state management
//! - Duration input parsing with lenient fallback
//! - Commands sent from the user interface to the engine
//! - Timer configuration (see `config`)

pub mod config;

use serde::{Deserialize, Serialize};

use crate::sound::AudioUpload;

pub use config::{ConfigError, TimerConfig};

/// Shortest duration a countdown can be configured with.
pub const MIN_DURATION_SECONDS: u32 = 1;

// ============================================================================
// CountdownStatus
// ============================================================================

/// Represents the current status of the countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownStatus {
    /// Not started yet
    #[default]
    Stopped,
    /// Counting down
    Running,
    /// Paused by the user
    Paused,
}

impl CountdownStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownStatus::Stopped => "stopped",
            CountdownStatus::Running => "running",
            CountdownStatus::Paused => "paused",
        }
    }
}

// ============================================================================
// CountdownState
// ============================================================================

/// Represents the current state of the countdown.
///
/// `remaining_seconds` never exceeds `duration_seconds`, and the duration
/// only changes through `configure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    /// Full duration restored on every reset and expiry
    duration_seconds: u32,
    /// Seconds left until expiry
    remaining_seconds: u32,
    /// Current status
    status: CountdownStatus,
}

impl CountdownState {
    /// Creates a stopped countdown with the given duration.
    pub fn new(duration_seconds: u32) -> Self {
        let duration_seconds = duration_seconds.max(MIN_DURATION_SECONDS);
        Self {
            duration_seconds,
            remaining_seconds: duration_seconds,
            status: CountdownStatus::Stopped,
        }
    }

    /// Sets a new duration and refills the remaining time.
    pub fn configure(&mut self, duration_seconds: u32) {
        self.duration_seconds = duration_seconds.max(MIN_DURATION_SECONDS);
        self.remaining_seconds = self.duration_seconds;
    }

    /// Refills the remaining time and marks the countdown as running.
    pub fn restart(&mut self) {
        self.remaining_seconds = self.duration_seconds;
        self.status = CountdownStatus::Running;
    }

    /// Pauses a running countdown.
    pub fn pause(&mut self) {
        if self.status == CountdownStatus::Running {
            self.status = CountdownStatus::Paused;
        }
    }

    /// Resumes a paused countdown without touching the remaining time.
    pub fn resume(&mut self) {
        if self.status == CountdownStatus::Paused {
            self.status = CountdownStatus::Running;
        }
    }

    /// Refills the remaining time, leaving the status alone.
    pub fn reset_now(&mut self) {
        self.remaining_seconds = self.duration_seconds;
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if the countdown has expired (reached 0).
    pub fn tick(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn status(&self) -> CountdownStatus {
        self.status
    }

    /// Returns true if the countdown is actively running.
    pub fn is_running(&self) -> bool {
        self.status == CountdownStatus::Running
    }

    /// Returns true if the countdown is paused.
    pub fn is_paused(&self) -> bool {
        self.status == CountdownStatus::Paused
    }

    /// Returns the remaining time as zero-padded (minutes, seconds) text.
    pub fn display_parts(&self) -> (String, String) {
        format_display(self.remaining_seconds)
    }

    /// Sets the remaining time directly (for testing).
    #[cfg(test)]
    pub(crate) fn set_remaining_seconds(&mut self, seconds: u32) {
        self.remaining_seconds = seconds.min(self.duration_seconds);
    }
}

/// Formats seconds as zero-padded minutes and seconds text.
///
/// Minutes are not capped, so 100 minutes renders as `"100"`.
pub fn format_display(total_seconds: u32) -> (String, String) {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    (format!("{:02}", minutes), format!("{:02}", seconds))
}

// ============================================================================
// DurationInput
// ============================================================================

/// Raw duration fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationInput {
    /// Minutes field
    pub minutes: String,
    /// Seconds field
    pub seconds: String,
}

impl DurationInput {
    /// Creates input from the raw field texts.
    pub fn new(minutes: impl Into<String>, seconds: impl Into<String>) -> Self {
        Self {
            minutes: minutes.into(),
            seconds: seconds.into(),
        }
    }

    /// Creates input from numeric values.
    pub fn from_parts(minutes: u32, seconds: u32) -> Self {
        Self::new(minutes.to_string(), seconds.to_string())
    }

    /// Returns the parsed (minutes, seconds), with unparsable fields as 0.
    pub fn parts(&self) -> (i64, i64) {
        (
            parse_duration_field(&self.minutes),
            parse_duration_field(&self.seconds),
        )
    }

    /// Returns the total duration in seconds, clamped to at least one second.
    pub fn total_seconds(&self) -> u32 {
        let (minutes, seconds) = self.parts();
        let total = minutes.saturating_mul(60).saturating_add(seconds);
        total.clamp(i64::from(MIN_DURATION_SECONDS), i64::from(u32::MAX)) as u32
    }
}

/// Parses the leading integer of a field, treating anything else as 0.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit: `"12abc"` is 12, `"abc"` is 0, `"-3"` is -3.
pub fn parse_duration_field(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });

    if negative {
        -value
    } else {
        value
    }
}

// ============================================================================
// Command
// ============================================================================

/// A user action delivered to the timer engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Apply a new duration and restart the countdown
    Configure(DurationInput),
    /// Restart the countdown with the current duration
    Start,
    /// Toggle between running and paused
    TogglePause,
    /// Reset the countdown immediately (click / spacebar)
    ManualReset,
    /// Upload an alarm sound into slot `index`, or append when out of range
    UploadAlarm {
        /// Target slot
        index: Option<usize>,
        /// Display name typed by the user
        name: Option<String>,
        /// Selected file
        upload: AudioUpload,
    },
    /// Remove the alarm at `index`
    RemoveAlarm {
        /// Slot to remove
        index: usize,
    },
    /// Rename the alarm at `index`
    RenameAlarm {
        /// Slot to rename
        index: usize,
        /// New display name
        name: String,
    },
    /// Replace the manual reset sound
    UploadResetSound {
        /// Selected file
        upload: AudioUpload,
    },
    /// Enable or mute all sounds
    SetSoundEnabled(bool),
    /// Report the alarm list
    ListAlarms,
    /// Stop the engine loop
    Shutdown,
}

// ============================================================================
// Tests
// ============================================================================
