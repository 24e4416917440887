//! CLI module for the alarm timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Line commands read from stdin while running
//! - `display`: Output formatting and display logic
//! - `presenter`: Renders engine events and plays sounds

pub mod commands;
pub mod display;
pub mod input;
pub mod presenter;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
pub use input::{parse_line, InputError, LineCommand};
pub use presenter::Presenter;
