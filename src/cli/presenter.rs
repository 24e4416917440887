//! Terminal presenter for timer events.
//!
//! The presenter is the engine's "page": it turns `TimerEvent`s into
//! terminal output and sound playback. The countdown overwrites itself on a
//! single line; every other notice goes on a line of its own below it.

use std::io::{self, Write};
use std::time::Duration;

use tracing::{debug, warn};

use crate::engine::TimerEvent;
use crate::sound::{SoundPlayer, SoundSource};

use super::display::{Display, INITIAL_TITLE};

/// Terminal bell, used when sound is requested but no device is available.
const BELL: &str = "\x07";

/// Opens the audio device on demand.
type PlayerFactory<P> = Box<dyn FnMut() -> Option<P>>;

/// Renders timer events to a writer and plays requested sounds.
pub struct Presenter<P: SoundPlayer, W: Write> {
    player: Option<P>,
    open_player: Option<PlayerFactory<P>>,
    out: W,
    countdown_line_open: bool,
    /// Last alarm label, re-rendered plain when a highlight ends
    alarm_label: Option<String>,
}

impl<P: SoundPlayer, W: Write> Presenter<P, W> {
    /// Creates a presenter. Without a player, sound requests ring the
    /// terminal bell instead.
    pub fn new(player: Option<P>, out: W) -> Self {
        Self {
            player,
            open_player: None,
            out,
            countdown_line_open: false,
            alarm_label: None,
        }
    }

    /// Lets the presenter open the audio device when sound is enabled after
    /// starting without a player.
    pub fn with_player_factory(mut self, factory: impl FnMut() -> Option<P> + 'static) -> Self {
        self.open_player = Some(Box::new(factory));
        self
    }

    /// Prints the initial title.
    pub fn show_initial_title(&mut self) -> io::Result<()> {
        self.write_line(INITIAL_TITLE)
    }

    /// Prints the command help.
    pub fn show_help(&mut self) -> io::Result<()> {
        self.write_line(Display::help_text())
    }

    /// Prints an input error with a hint.
    pub fn show_input_error(&mut self, message: &str, suggestion: &str) -> io::Result<()> {
        self.write_line(&format!("エラー: {}", message))?;
        self.write_line(&format!("  ヒント: {}", suggestion))
    }

    /// Applies one engine event.
    pub fn handle(&mut self, event: &TimerEvent) -> io::Result<()> {
        match event {
            TimerEvent::DisplayUpdated { minutes, seconds } => {
                write!(self.out, "\r{}", Display::format_countdown(minutes, seconds))?;
                self.out.flush()?;
                self.countdown_line_open = true;
                Ok(())
            }
            TimerEvent::PauseLabelChanged { label, paused } => {
                self.write_line(&Display::format_pause_state(label, *paused))
            }
            TimerEvent::AlarmNameChanged { name, highlighted } => {
                self.alarm_label = Some(name.clone());
                self.write_line(&Display::format_title(name, *highlighted))
            }
            TimerEvent::AlarmHighlightCleared => match self.alarm_label.clone() {
                Some(name) => self.write_line(&Display::format_title(&name, false)),
                None => {
                    debug!("Highlight cleared before any alarm label");
                    Ok(())
                }
            },
            TimerEvent::Expired { alarm_name } => {
                debug!("Expired with alarm '{}'", alarm_name);
                Ok(())
            }
            TimerEvent::PlayRequested { source } => self.play(source),
            TimerEvent::PreviewRequested {
                source,
                duration_ms,
            } => self.preview(source, Duration::from_millis(*duration_ms)),
            TimerEvent::UploadRejected { file_name, message } => {
                self.write_line(&Display::format_upload_rejected(file_name, message))
            }
            TimerEvent::SoundToggled { enabled } => {
                if *enabled {
                    self.ensure_player();
                }
                self.write_line(&Display::format_sound_toggle(*enabled))
            }
            TimerEvent::AlarmsListed { names, cursor } => {
                for line in Display::format_alarm_list(names, *cursor) {
                    self.write_line(&line)?;
                }
                Ok(())
            }
        }
    }

    /// Returns the player, if audio is available.
    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }

    /// Consumes the presenter and returns its writer.
    pub fn into_output(self) -> W {
        self.out
    }

    fn ensure_player(&mut self) {
        if self.player.is_some() {
            return;
        }
        if let Some(open_player) = self.open_player.as_mut() {
            self.player = open_player();
            if self.player.is_some() {
                debug!("Audio player opened after unmute");
            }
        }
    }

    fn play(&mut self, source: &SoundSource) -> io::Result<()> {
        match &self.player {
            Some(player) => {
                if let Err(e) = player.play(source) {
                    warn!("Failed to play '{}': {}", source.name(), e);
                }
                Ok(())
            }
            None => self.ring_bell(),
        }
    }

    fn preview(&mut self, source: &SoundSource, duration: Duration) -> io::Result<()> {
        match &self.player {
            Some(player) => {
                if let Err(e) = player.preview(source, duration) {
                    warn!("Failed to preview '{}': {}", source.name(), e);
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn ring_bell(&mut self) -> io::Result<()> {
        write!(self.out, "{}", BELL)?;
        self.out.flush()
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        if self.countdown_line_open {
            writeln!(self.out)?;
            self.countdown_line_open = false;
        }
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }
}

// ============================================================================
// Tests
// ============================================================================
