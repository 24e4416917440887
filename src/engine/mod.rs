//! Timer engine.
//!
//! This module contains the countdown core:
//! - `timer`: state machine, alarm rotation and the async run loop
//! - `ticker`: the cancellable repeating tick source

pub mod ticker;
pub mod timer;

pub use ticker::TickSource;
pub use timer::{TimerEngine, TimerEvent};
