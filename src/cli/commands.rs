//! Command definitions for the alarm timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::TimerConfig;

// ============================================================================
// CLI Structure
// ============================================================================

/// Alarm Timer - a repeating countdown with rotating alarm sounds
#[derive(Parser, Debug)]
#[command(
    name = "alarm-timer",
    version,
    about = "繰り返しカウントダウンするアラームタイマー",
    long_about = "設定した時間を繰り返しカウントダウンし、満了のたびにアラーム音を順番に鳴らします。\n\
                  起動後は標準入力からコマンドを受け付けます（help で一覧を表示）。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the countdown and read commands from stdin
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Countdown minutes (overrides the config file)
    #[arg(short, long)]
    pub minutes: Option<u32>,

    /// Countdown seconds (overrides the config file); 90 means 1:30
    #[arg(short, long)]
    pub seconds: Option<u32>,

    /// Alarm sound file; repeat to queue several in rotation order
    #[arg(short, long = "alarm", value_name = "PATH")]
    pub alarms: Vec<PathBuf>,

    /// Sound file played on manual reset
    #[arg(short, long, value_name = "PATH")]
    pub reset_sound: Option<PathBuf>,

    /// Start with every sound muted
    #[arg(long)]
    pub mute: bool,

    /// Path to a JSON config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl RunArgs {
    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply_to(&self, mut config: TimerConfig) -> TimerConfig {
        if let Some(minutes) = self.minutes {
            config.minutes = minutes;
        }
        if let Some(seconds) = self.seconds {
            config.seconds = seconds;
        }
        if self.mute {
            config.sound_enabled = false;
        }
        config
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["alarm-timer"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["alarm-timer", "--verbose"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_short_verbose_flag() {
            let cli = Cli::parse_from(["alarm-timer", "run", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_completions_bash() {
            let cli = Cli::parse_from(["alarm-timer", "completions", "bash"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Bash);
                }
                _ => panic!("Expected Completions command"),
            }
        }

        #[test]
        fn test_parse_completions_zsh() {
            let cli = Cli::parse_from(["alarm-timer", "completions", "zsh"]);
            assert!(matches!(
                cli.command,
                Some(Commands::Completions {
                    shell: clap_complete::Shell::Zsh
                })
            ));
        }

        #[test]
        fn test_parse_unknown_shell_fails() {
            let result = Cli::try_parse_from(["alarm-timer", "completions", "cmd"]);
            assert!(result.is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Run Command Tests
    // ------------------------------------------------------------------------

    mod run_args_tests {
        use super::*;

        fn parse_run(args: &[&str]) -> RunArgs {
            let mut argv = vec!["alarm-timer", "run"];
            argv.extend_from_slice(args);
            match Cli::parse_from(argv).command {
                Some(Commands::Run(args)) => args,
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_parse_run_defaults() {
            let args = parse_run(&[]);
            assert!(args.minutes.is_none());
            assert!(args.seconds.is_none());
            assert!(args.alarms.is_empty());
            assert!(args.reset_sound.is_none());
            assert!(!args.mute);
            assert!(args.config.is_none());
        }

        #[test]
        fn test_parse_run_duration() {
            let args = parse_run(&["--minutes", "2", "-s", "30"]);
            assert_eq!(args.minutes, Some(2));
            assert_eq!(args.seconds, Some(30));
        }

        #[test]
        fn test_parse_run_seconds_past_one_minute() {
            let args = parse_run(&["--minutes", "0", "--seconds", "90"]);
            assert_eq!(args.seconds, Some(90));

            let config = args.apply_to(TimerConfig::default());
            assert_eq!(config.duration_seconds(), 90);
        }

        #[test]
        fn test_parse_run_negative_seconds_fails() {
            let result = Cli::try_parse_from(["alarm-timer", "run", "--seconds", "-1"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_run_multiple_alarms() {
            let args = parse_run(&["--alarm", "a.mp3", "-a", "b.wav"]);
            assert_eq!(
                args.alarms,
                vec![PathBuf::from("a.mp3"), PathBuf::from("b.wav")]
            );
        }

        #[test]
        fn test_parse_run_reset_sound_and_mute() {
            let args = parse_run(&["--reset-sound", "click.wav", "--mute"]);
            assert_eq!(args.reset_sound, Some(PathBuf::from("click.wav")));
            assert!(args.mute);
        }

        #[test]
        fn test_parse_run_config() {
            let args = parse_run(&["--config", "/tmp/timer.json"]);
            assert_eq!(args.config, Some(PathBuf::from("/tmp/timer.json")));
        }
    }

    // ------------------------------------------------------------------------
    // Override Tests
    // ------------------------------------------------------------------------

    mod override_tests {
        use super::*;

        #[test]
        fn test_apply_to_keeps_config_without_flags() {
            let config = TimerConfig::default().with_duration(3, 15);
            let applied = RunArgs::default().apply_to(config.clone());
            assert_eq!(applied, config);
        }

        #[test]
        fn test_apply_to_overrides_each_field() {
            let args = RunArgs {
                minutes: Some(0),
                seconds: Some(5),
                mute: true,
                ..RunArgs::default()
            };

            let applied = args.apply_to(TimerConfig::default());
            assert_eq!(applied.minutes, 0);
            assert_eq!(applied.seconds, 5);
            assert!(!applied.sound_enabled);
        }

        #[test]
        fn test_apply_to_partial_override() {
            let args = RunArgs {
                seconds: Some(45),
                ..RunArgs::default()
            };

            let applied = args.apply_to(TimerConfig::default().with_duration(2, 0));
            assert_eq!(applied.minutes, 2);
            assert_eq!(applied.seconds, 45);
        }
    }
}
