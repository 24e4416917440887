//! Alarm Timer CLI - a repeating countdown with rotating alarm sounds
//!
//! The countdown restarts on every expiry and plays the next alarm in the
//! rotation. While it runs, commands are read from stdin one per line.

use std::io::BufRead;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;
use tracing::{debug, info};

use alarm_timer::cli::{parse_line, Cli, Commands, Display, Presenter, RunArgs};
use alarm_timer::sound::{try_create_player, AudioUpload, RodioSoundPlayer};
use alarm_timer::{Command, TimerConfig, TimerEngine};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never interleave with the countdown line.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run_timer(args).await?,
        Some(Commands::Completions { shell }) => generate_completions(shell),
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs the countdown until `q`, EOF on stdin or Ctrl-C.
async fn run_timer(args: RunArgs) -> Result<()> {
    let config = TimerConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = args.apply_to(config);
    config.validate()?;
    debug!("Effective configuration: {:?}", config);

    let alarms = args
        .alarms
        .iter()
        .map(|path| AudioUpload::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;
    let reset_sound = args
        .reset_sound
        .as_deref()
        .map(AudioUpload::from_path)
        .transpose()?;

    // A muted start leaves the device closed until the first unmute
    let player = if config.sound_enabled {
        try_create_player()
    } else {
        None
    };
    let mut presenter: Presenter<RodioSoundPlayer, _> =
        Presenter::new(player, std::io::stdout()).with_player_factory(try_create_player);
    presenter.show_initial_title()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let mut engine = TimerEngine::new(config, event_tx);
    engine.preload(alarms, reset_sound)?;
    engine.start()?;

    let engine_task = tokio::spawn(async move { engine.run(command_rx).await });
    let mut lines = spawn_stdin_reader();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            event = event_rx.recv() => match event {
                Some(event) => presenter.handle(&event)?,
                // The engine dropped its sender: it has shut down
                None => break,
            },
            line = lines.recv(), if stdin_open => match line {
                Some(line) => {
                    match parse_line(&line).and_then(|command| command.into_command()) {
                        Ok(Some(command)) => send_command(&command_tx, command),
                        Ok(None) => presenter.show_help()?,
                        Err(e) => presenter.show_input_error(&e.to_string(), e.suggestion())?,
                    }
                }
                None => {
                    debug!("stdin closed");
                    stdin_open = false;
                    send_command(&command_tx, Command::Shutdown);
                }
            },
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                debug!("Ctrl-C received");
                send_command(&command_tx, Command::Shutdown);
            }
        }
    }

    engine_task.await.context("Timer engine task panicked")??;
    println!();
    Ok(())
}

/// Forwards a command to the engine; a closed channel means it already
/// stopped.
fn send_command(command_tx: &mpsc::UnboundedSender<Command>, command: Command) {
    if command_tx.send(command).is_err() {
        debug!("Timer engine already stopped");
    }
}

/// Reads stdin lines on a plain thread so a pending read never holds up
/// shutdown.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (line_tx, line_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    line_rx
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
