//! Alarm Timer Library
//!
//! This library provides the core functionality for the alarm timer CLI.
//! It includes:
//! - Timer engine driving a repeating countdown with pause/resume
//! - Alarm registry rotating through named, user-supplied sounds
//! - Sound loading and playback with built-in default tones
//! - CLI command parsing, stdin line commands and terminal display
//! - Type definitions for configuration, state and commands

pub mod alarm;
pub mod cli;
pub mod engine;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    Command, ConfigError, CountdownState, CountdownStatus, DurationInput, TimerConfig,
};

// Re-export engine types
pub use engine::{TickSource, TimerEngine, TimerEvent};

// Re-export alarm types
pub use alarm::{AlarmEntry, AlarmRegistry};

// Re-export sound types
pub use sound::{
    load_audio_resource, AudioUpload, MockSoundPlayer, RodioSoundPlayer, SoundError,
    SoundHandle, SoundPlayer, SoundSource,
};
