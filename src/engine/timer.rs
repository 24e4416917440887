//! Timer engine for the alarm timer.
//!
//! This module provides the core timer functionality:
//! - State transitions (Stopped → Running ⇄ Paused)
//! - Countdown driven by an owned `TickSource`
//! - Auto-restart on expiry with rotating alarm sounds
//! - Event firing for the display and the sound player

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::alarm::AlarmRegistry;
use crate::sound::{
    default_alarm_sound, default_reset_sound, load_audio_resource, AudioUpload, SoundError,
    SoundSource,
};
use crate::types::{Command, CountdownState, DurationInput, TimerConfig};

use super::ticker::{wait_until, TickSource};

/// Pause button label while the countdown runs.
pub const PAUSE_LABEL: &str = "Pause";

/// Pause button label while the countdown is paused.
pub const RESUME_LABEL: &str = "Resume";

/// Alarm label used when the built-in alarm plays.
pub const DEFAULT_ALARM_LABEL: &str = "Default Alarm";

/// Alarm label shown when no alarm is queued.
pub const IDLE_ALARM_LABEL: &str = "Timer";

// ============================================================================
// TimerEvent
// ============================================================================

/// Side effects requested by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Remaining time changed
    DisplayUpdated {
        /// Zero-padded minutes
        minutes: String,
        /// Zero-padded seconds
        seconds: String,
    },
    /// Pause affordance changed
    PauseLabelChanged {
        /// Button text
        label: String,
        /// Whether the paused visual state applies
        paused: bool,
    },
    /// The "current alarm" label changed
    AlarmNameChanged {
        /// Label text
        name: String,
        /// Whether the label is highlighted (after an expiry)
        highlighted: bool,
    },
    /// The expiry highlight ended
    AlarmHighlightCleared,
    /// The countdown reached zero and restarted
    Expired {
        /// Name of the alarm that fired
        alarm_name: String,
    },
    /// A sound should play now
    PlayRequested {
        /// Sound to play
        source: SoundSource,
    },
    /// A short preview of a freshly uploaded sound should play
    PreviewRequested {
        /// Sound to preview
        source: SoundSource,
        /// Preview length
        duration_ms: u64,
    },
    /// An upload was refused
    UploadRejected {
        /// Rejected file
        file_name: String,
        /// User-facing reason
        message: String,
    },
    /// Sound was enabled or muted
    SoundToggled {
        /// New state
        enabled: bool,
    },
    /// Snapshot of the alarm list
    AlarmsListed {
        /// Entry names in rotation order
        names: Vec<String>,
        /// Index of the next alarm
        cursor: usize,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the countdown, the alarm list and the tick source.
pub struct TimerEngine {
    /// Countdown state
    state: CountdownState,
    /// Uploaded alarms and rotation cursor
    alarms: AlarmRegistry,
    /// Timer configuration
    config: TimerConfig,
    /// Alarm played when no alarm is uploaded
    default_alarm: SoundSource,
    /// Sound played on manual reset
    reset_sound: SoundSource,
    /// Global mute flag
    sound_enabled: bool,
    /// Active tick source, if counting down
    ticker: Option<TickSource>,
    /// Number of tick sources created so far
    tick_generation: u64,
    /// When the expiry highlight ends
    highlight_deadline: Option<Instant>,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a stopped engine with the given configuration and event channel.
    pub fn new(config: TimerConfig, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: CountdownState::new(config.duration_seconds()),
            alarms: AlarmRegistry::new(),
            sound_enabled: config.sound_enabled,
            config,
            default_alarm: default_alarm_sound(),
            reset_sound: default_reset_sound(),
            ticker: None,
            tick_generation: 0,
            highlight_deadline: None,
            event_tx,
        }
    }

    /// Runs the engine loop until `Command::Shutdown` arrives or every
    /// command sender is dropped.
    ///
    /// Commands, ticks and the highlight timeout are handled one at a time;
    /// each runs to completion before the next is polled.
    pub async fn run(&mut self, mut commands: mpsc::UnboundedReceiver<Command>) -> Result<()> {
        info!("Timer engine started");

        loop {
            let tick_deadline = self.ticker.as_ref().map(TickSource::deadline);
            let highlight_deadline = self.highlight_deadline;

            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command)?,
                },
                _ = wait_until(tick_deadline) => {
                    if let Some(ticker) = self.ticker.as_mut() {
                        ticker.advance();
                    }
                    self.tick()?;
                }
                _ = wait_until(highlight_deadline) => {
                    self.clear_highlight()?;
                }
            }
        }

        self.release_tick_source();
        info!("Timer engine stopped");
        Ok(())
    }

    /// Dispatches a single command.
    pub fn handle_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Configure(input) => self.configure(&input),
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::ManualReset => self.manual_reset(),
            Command::UploadAlarm {
                index,
                name,
                upload,
            } => self.upload_alarm(index, name, upload),
            Command::RemoveAlarm { index } => self.remove_alarm(index),
            Command::RenameAlarm { index, name } => self.rename_alarm(index, &name),
            Command::UploadResetSound { upload } => self.upload_reset_sound(upload),
            Command::SetSoundEnabled(enabled) => self.set_sound_enabled(enabled),
            Command::ListAlarms => self.list_alarms(),
            Command::Shutdown => {
                self.release_tick_source();
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------------
    // Countdown
    // ------------------------------------------------------------------------

    /// Applies a new duration (at least one second) and restarts.
    pub fn configure(&mut self, input: &DurationInput) -> Result<()> {
        let duration = input.total_seconds();
        info!("Countdown configured to {} seconds", duration);

        self.state.configure(duration);
        self.start()
    }

    /// Restarts the countdown from the full duration with a fresh tick source.
    pub fn start(&mut self) -> Result<()> {
        self.acquire_tick_source();
        self.state.restart();

        self.emit_display()?;
        self.emit(TimerEvent::PauseLabelChanged {
            label: PAUSE_LABEL.to_string(),
            paused: false,
        })
    }

    /// Toggles between running and paused.
    ///
    /// Pausing drops the tick source; resuming creates a new one, so time
    /// spent paused is never caught up.
    pub fn toggle_pause(&mut self) -> Result<()> {
        if self.state.is_running() {
            self.release_tick_source();
            self.state.pause();
            info!("Countdown paused at {}s", self.state.remaining_seconds());

            self.emit(TimerEvent::PauseLabelChanged {
                label: RESUME_LABEL.to_string(),
                paused: true,
            })
        } else if self.state.is_paused() {
            self.state.resume();
            self.acquire_tick_source();
            info!("Countdown resumed at {}s", self.state.remaining_seconds());

            self.emit(TimerEvent::PauseLabelChanged {
                label: PAUSE_LABEL.to_string(),
                paused: false,
            })
        } else {
            debug!("Ignoring pause toggle before the countdown started");
            Ok(())
        }
    }

    /// Advances the countdown by one tick.
    ///
    /// On expiry the alarm fires and the countdown refills.
    pub fn tick(&mut self) -> Result<()> {
        if !self.state.is_running() {
            debug!("Ignoring tick while {}", self.state.status().as_str());
            return Ok(());
        }

        if self.state.tick() {
            self.fire_on_expiry()?;
            self.state.reset_now();
        }

        self.emit_display()
    }

    /// Refills the remaining time without touching status or tick source.
    pub fn reset_now(&mut self) -> Result<()> {
        self.state.reset_now();
        self.emit_display()
    }

    // ------------------------------------------------------------------------
    // Alarms
    // ------------------------------------------------------------------------

    /// Plays the alarm under the cursor (or the default) and rotates.
    fn fire_on_expiry(&mut self) -> Result<()> {
        let (name, source) = match self.alarms.take_next() {
            Some(entry) => (entry.name().to_string(), entry.source()),
            None => (DEFAULT_ALARM_LABEL.to_string(), self.default_alarm.clone()),
        };
        info!("Countdown expired, alarm '{}'", name);

        self.emit(TimerEvent::Expired {
            alarm_name: name.clone(),
        })?;
        self.emit(TimerEvent::AlarmNameChanged {
            name,
            highlighted: true,
        })?;
        self.highlight_deadline = Some(Instant::now() + self.config.highlight_duration());

        self.request_play(source)
    }

    /// Handles a click / spacebar reset.
    ///
    /// Plays the reset sound, refills the countdown and moves the alarm
    /// cursor forward so the next expiry uses the following alarm.
    pub fn manual_reset(&mut self) -> Result<()> {
        self.request_play(self.reset_sound.clone())?;
        self.reset_now()?;

        let name = self
            .alarms
            .advance()
            .map_or_else(|| IDLE_ALARM_LABEL.to_string(), |e| e.name().to_string());

        self.emit(TimerEvent::AlarmNameChanged {
            name,
            highlighted: false,
        })
    }

    /// Stores an uploaded alarm in slot `index`, or appends it.
    ///
    /// Non-audio files are rejected with an `UploadRejected` event and
    /// leave the alarm list untouched.
    pub fn upload_alarm(
        &mut self,
        index: Option<usize>,
        name: Option<String>,
        upload: AudioUpload,
    ) -> Result<()> {
        let file_name = upload.file_name.clone();
        let handle = match load_audio_resource(upload) {
            Ok(handle) => handle,
            Err(e) => return self.reject_upload(file_name, e),
        };

        let slot = self.alarms.upload(index, name.as_deref(), handle);
        let (entry_name, source) = match self.alarms.get(slot.index()) {
            Some(entry) => (entry.name().to_string(), entry.source()),
            None => return Ok(()),
        };
        info!("Alarm '{}' stored: {:?}", entry_name, slot);

        if slot.index() == self.alarms.cursor() {
            self.emit(TimerEvent::AlarmNameChanged {
                name: entry_name,
                highlighted: false,
            })?;
        }

        self.request_preview(source)
    }

    /// Removes the alarm at `index`; stale indices are ignored.
    pub fn remove_alarm(&mut self, index: usize) -> Result<()> {
        let Some(removed) = self.alarms.remove_entry(index) else {
            debug!("Ignoring removal of stale alarm index {}", index);
            return Ok(());
        };
        info!("Alarm '{}' removed", removed.name());
        drop(removed);

        let name = self
            .alarms
            .current()
            .map_or_else(|| IDLE_ALARM_LABEL.to_string(), |e| e.name().to_string());

        self.emit(TimerEvent::AlarmNameChanged {
            name,
            highlighted: false,
        })
    }

    /// Renames the alarm at `index`; stale indices are ignored.
    pub fn rename_alarm(&mut self, index: usize, name: &str) -> Result<()> {
        match self.alarms.rename_entry(index, name) {
            None => {
                debug!("Ignoring rename of stale alarm index {}", index);
                Ok(())
            }
            Some(false) => Ok(()),
            Some(true) => {
                let name = self
                    .alarms
                    .current()
                    .map(|e| e.name().to_string())
                    .unwrap_or_default();
                self.emit(TimerEvent::AlarmNameChanged {
                    name,
                    highlighted: false,
                })
            }
        }
    }

    /// Registers the alarms and reset sound given at startup.
    ///
    /// Same validation as the upload commands, without previews.
    pub fn preload(
        &mut self,
        alarms: Vec<AudioUpload>,
        reset_sound: Option<AudioUpload>,
    ) -> Result<()> {
        for upload in alarms {
            let file_name = upload.file_name.clone();
            match load_audio_resource(upload) {
                Ok(handle) => {
                    let index = self.alarms.add_entry(None, handle);
                    debug!("Preloaded alarm #{} from '{}'", index, file_name);
                }
                Err(e) => self.reject_upload(file_name, e)?,
            }
        }

        if let Some(upload) = reset_sound {
            let file_name = upload.file_name.clone();
            match load_audio_resource(upload) {
                Ok(handle) => self.reset_sound = SoundSource::Uploaded(handle),
                Err(e) => self.reject_upload(file_name, e)?,
            }
        }

        Ok(())
    }

    /// Replaces the manual reset sound.
    pub fn upload_reset_sound(&mut self, upload: AudioUpload) -> Result<()> {
        let file_name = upload.file_name.clone();
        let handle = match load_audio_resource(upload) {
            Ok(handle) => handle,
            Err(e) => return self.reject_upload(file_name, e),
        };

        info!("Reset sound replaced with '{}'", handle.file_name());
        self.reset_sound = SoundSource::Uploaded(handle);
        self.request_preview(self.reset_sound.clone())
    }

    /// Enables or mutes every sound.
    pub fn set_sound_enabled(&mut self, enabled: bool) -> Result<()> {
        self.sound_enabled = enabled;
        info!("Sound {}", if enabled { "enabled" } else { "muted" });
        self.emit(TimerEvent::SoundToggled { enabled })
    }

    /// Reports the alarm list.
    pub fn list_alarms(&self) -> Result<()> {
        self.emit(TimerEvent::AlarmsListed {
            names: self.alarms.names(),
            cursor: self.alarms.cursor(),
        })
    }

    /// Ends the expiry highlight.
    pub fn clear_highlight(&mut self) -> Result<()> {
        self.highlight_deadline = None;
        self.emit(TimerEvent::AlarmHighlightCleared)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns a reference to the countdown state.
    pub fn get_state(&self) -> &CountdownState {
        &self.state
    }

    /// Returns a reference to the alarm registry.
    pub fn alarms(&self) -> &AlarmRegistry {
        &self.alarms
    }

    pub fn reset_sound(&self) -> &SoundSource {
        &self.reset_sound
    }

    pub fn is_sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Returns true while a tick source is active.
    pub fn has_tick_source(&self) -> bool {
        self.ticker.is_some()
    }

    /// Returns the generation of the active tick source.
    pub fn tick_generation(&self) -> Option<u64> {
        self.ticker.as_ref().map(TickSource::generation)
    }

    /// Returns true while the alarm label is highlighted.
    pub fn is_highlighted(&self) -> bool {
        self.highlight_deadline.is_some()
    }

    /// Returns a mutable reference to the countdown state (for testing).
    #[cfg(test)]
    pub fn get_state_mut(&mut self) -> &mut CountdownState {
        &mut self.state
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// Replaces any active tick source with a fresh one.
    fn acquire_tick_source(&mut self) {
        self.release_tick_source();
        self.tick_generation += 1;
        self.ticker = Some(TickSource::start(
            self.config.tick_interval(),
            self.tick_generation,
        ));
        debug!("Tick source #{} started", self.tick_generation);
    }

    fn release_tick_source(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!("Tick source #{} cancelled", ticker.generation());
        }
    }

    fn reject_upload(&self, file_name: String, error: SoundError) -> Result<()> {
        warn!("Upload rejected: {}", error);
        self.emit(TimerEvent::UploadRejected {
            file_name,
            message: error.to_string(),
        })
    }

    fn request_play(&self, source: SoundSource) -> Result<()> {
        if !self.sound_enabled {
            debug!("Sound muted, skipping '{}'", source.name());
            return Ok(());
        }
        self.emit(TimerEvent::PlayRequested { source })
    }

    fn request_preview(&self, source: SoundSource) -> Result<()> {
        if !self.sound_enabled {
            debug!("Sound muted, skipping preview of '{}'", source.name());
            return Ok(());
        }
        self.emit(TimerEvent::PreviewRequested {
            source,
            duration_ms: self.config.preview_ms,
        })
    }

    fn emit_display(&self) -> Result<()> {
        let (minutes, seconds) = self.state.display_parts();
        self.emit(TimerEvent::DisplayUpdated { minutes, seconds })
    }

    fn emit(&self, event: TimerEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .context("Failed to send timer event")
    }
}

// ============================================================================
// Tests
// ============================================================================
