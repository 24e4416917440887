//! Alarm sound registry.
//!
//! This module provides:
//! - `AlarmEntry`: a named, uploaded alarm sound
//! - `AlarmRegistry`: ordered entries with a rotation cursor

pub mod registry;

pub use registry::{resolve_alarm_name, AlarmEntry, AlarmRegistry, UploadSlot, UNNAMED_ALARM};
