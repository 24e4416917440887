//! Line commands read from stdin while the timer runs.
//!
//! Each line is split shell-style (`shlex`), so paths and names with spaces
//! can be quoted: `add "~/My Sounds/gong.wav" "Big Gong"`.

use std::path::PathBuf;

use thiserror::Error;

use crate::sound::{AudioUpload, SoundError};
use crate::types::{Command, DurationInput};

/// Errors raised while interpreting an input line.
#[derive(Debug, Error)]
pub enum InputError {
    /// Quotes are not balanced.
    #[error("引用符が閉じられていません")]
    UnbalancedQuotes,

    /// The first word is not a known command.
    #[error("不明なコマンドです: {0}")]
    UnknownCommand(String),

    /// A required argument is missing.
    #[error("{command} には {argument} が必要です")]
    MissingArgument {
        /// Command name
        command: &'static str,
        /// Missing argument name
        argument: &'static str,
    },

    /// An alarm index is not a non-negative integer.
    #[error("番号が不正です: {0}")]
    InvalidIndex(String),

    /// The referenced sound file could not be read.
    #[error(transparent)]
    Sound(#[from] SoundError),
}

impl InputError {
    /// Returns a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::UnbalancedQuotes => "空白を含む値は \"...\" で囲んでください",
            Self::UnknownCommand(_) | Self::MissingArgument { .. } => {
                "help でコマンド一覧を確認してください"
            }
            Self::InvalidIndex(_) => "list で表示される番号を指定してください",
            Self::Sound(e) => e.suggestion(),
        }
    }
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    /// Manual reset (empty line or `r`)
    Reset,
    /// `p`
    TogglePause,
    /// `set M [S]`, fields kept raw so unparsable text counts as 0
    Set { minutes: String, seconds: String },
    /// `add PATH [NAME]`
    Add { path: PathBuf, name: Option<String> },
    /// `load INDEX PATH [NAME]`
    Load {
        index: usize,
        path: PathBuf,
        name: Option<String>,
    },
    /// `rm INDEX`
    Remove { index: usize },
    /// `rename INDEX [NAME]`
    Rename { index: usize, name: String },
    /// `reset-sound PATH`
    ResetSound { path: PathBuf },
    /// `mute`
    Mute,
    /// `unmute`
    Unmute,
    /// `list`
    List,
    /// `help`
    Help,
    /// `q`
    Quit,
}

impl LineCommand {
    /// Builds the engine command for this line.
    ///
    /// Sound files are read here. Returns `None` for lines the front-end
    /// handles on its own (`help`).
    pub fn into_command(self) -> Result<Option<Command>, InputError> {
        let command = match self {
            Self::Reset => Command::ManualReset,
            Self::TogglePause => Command::TogglePause,
            Self::Set { minutes, seconds } => {
                Command::Configure(DurationInput::new(minutes, seconds))
            }
            Self::Add { path, name } => Command::UploadAlarm {
                index: None,
                name,
                upload: AudioUpload::from_path(&path)?,
            },
            Self::Load { index, path, name } => Command::UploadAlarm {
                index: Some(index),
                name,
                upload: AudioUpload::from_path(&path)?,
            },
            Self::Remove { index } => Command::RemoveAlarm { index },
            Self::Rename { index, name } => Command::RenameAlarm { index, name },
            Self::ResetSound { path } => Command::UploadResetSound {
                upload: AudioUpload::from_path(&path)?,
            },
            Self::Mute => Command::SetSoundEnabled(false),
            Self::Unmute => Command::SetSoundEnabled(true),
            Self::List => Command::ListAlarms,
            Self::Quit => Command::Shutdown,
            Self::Help => return Ok(None),
        };
        Ok(Some(command))
    }
}

/// Parses one input line.
pub fn parse_line(line: &str) -> Result<LineCommand, InputError> {
    let words = shlex::split(line).ok_or(InputError::UnbalancedQuotes)?;
    let mut words = words.into_iter();

    let Some(verb) = words.next() else {
        return Ok(LineCommand::Reset);
    };

    let command = match verb.as_str() {
        "r" | "reset" => LineCommand::Reset,
        "p" | "pause" => LineCommand::TogglePause,
        "set" => LineCommand::Set {
            minutes: required(words.next(), "set", "分")?,
            seconds: words.next().unwrap_or_else(|| "0".to_string()),
        },
        "add" => LineCommand::Add {
            path: required(words.next(), "add", "ファイルパス")?.into(),
            name: words.next(),
        },
        "load" => LineCommand::Load {
            index: parse_index(words.next(), "load")?,
            path: required(words.next(), "load", "ファイルパス")?.into(),
            name: words.next(),
        },
        "rm" | "remove" => LineCommand::Remove {
            index: parse_index(words.next(), "rm")?,
        },
        "rename" => LineCommand::Rename {
            index: parse_index(words.next(), "rename")?,
            name: words.next().unwrap_or_default(),
        },
        "reset-sound" => LineCommand::ResetSound {
            path: required(words.next(), "reset-sound", "ファイルパス")?.into(),
        },
        "mute" => LineCommand::Mute,
        "unmute" => LineCommand::Unmute,
        "list" | "ls" => LineCommand::List,
        "help" | "?" => LineCommand::Help,
        "q" | "quit" | "exit" => LineCommand::Quit,
        _ => return Err(InputError::UnknownCommand(verb)),
    };

    Ok(command)
}

fn required(
    word: Option<String>,
    command: &'static str,
    argument: &'static str,
) -> Result<String, InputError> {
    word.ok_or(InputError::MissingArgument { command, argument })
}

fn parse_index(word: Option<String>, command: &'static str) -> Result<usize, InputError> {
    let word = required(word, command, "番号")?;
    word.parse().map_err(|_| InputError::InvalidIndex(word))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Parse Tests
    // ------------------------------------------------------------------------

    mod parse_tests {
        use super::*;

        #[test]
        fn test_empty_line_is_reset() {
            assert_eq!(parse_line("").unwrap(), LineCommand::Reset);
            assert_eq!(parse_line("   ").unwrap(), LineCommand::Reset);
            assert_eq!(parse_line("r").unwrap(), LineCommand::Reset);
        }

        #[test]
        fn test_simple_commands() {
            assert_eq!(parse_line("p").unwrap(), LineCommand::TogglePause);
            assert_eq!(parse_line("mute").unwrap(), LineCommand::Mute);
            assert_eq!(parse_line("unmute").unwrap(), LineCommand::Unmute);
            assert_eq!(parse_line("list").unwrap(), LineCommand::List);
            assert_eq!(parse_line("help").unwrap(), LineCommand::Help);
            assert_eq!(parse_line("q").unwrap(), LineCommand::Quit);
        }

        #[test]
        fn test_set_keeps_raw_fields() {
            assert_eq!(
                parse_line("set 2 30").unwrap(),
                LineCommand::Set {
                    minutes: "2".to_string(),
                    seconds: "30".to_string()
                }
            );
            assert_eq!(
                parse_line("set abc").unwrap(),
                LineCommand::Set {
                    minutes: "abc".to_string(),
                    seconds: "0".to_string()
                }
            );
        }

        #[test]
        fn test_set_requires_minutes() {
            assert!(matches!(
                parse_line("set"),
                Err(InputError::MissingArgument { command: "set", .. })
            ));
        }

        #[test]
        fn test_add_with_quoted_path_and_name() {
            assert_eq!(
                parse_line(r#"add "/tmp/My Sounds/gong.wav" "Big Gong""#).unwrap(),
                LineCommand::Add {
                    path: PathBuf::from("/tmp/My Sounds/gong.wav"),
                    name: Some("Big Gong".to_string()),
                }
            );
        }

        #[test]
        fn test_load_into_slot() {
            assert_eq!(
                parse_line("load 1 bell.mp3").unwrap(),
                LineCommand::Load {
                    index: 1,
                    path: PathBuf::from("bell.mp3"),
                    name: None,
                }
            );
        }

        #[test]
        fn test_remove_and_rename() {
            assert_eq!(
                parse_line("rm 0").unwrap(),
                LineCommand::Remove { index: 0 }
            );
            assert_eq!(
                parse_line("rename 2 Morning").unwrap(),
                LineCommand::Rename {
                    index: 2,
                    name: "Morning".to_string()
                }
            );
            assert_eq!(
                parse_line("rename 2").unwrap(),
                LineCommand::Rename {
                    index: 2,
                    name: String::new()
                }
            );
        }

        #[test]
        fn test_invalid_index() {
            assert!(matches!(
                parse_line("rm -1"),
                Err(InputError::InvalidIndex(word)) if word == "-1"
            ));
            assert!(matches!(
                parse_line("rm"),
                Err(InputError::MissingArgument { command: "rm", .. })
            ));
        }

        #[test]
        fn test_unknown_command() {
            assert!(matches!(
                parse_line("dance"),
                Err(InputError::UnknownCommand(verb)) if verb == "dance"
            ));
        }

        #[test]
        fn test_unbalanced_quotes() {
            assert!(matches!(
                parse_line(r#"add "unterminated"#),
                Err(InputError::UnbalancedQuotes)
            ));
        }
    }

    // ------------------------------------------------------------------------
    // Command Conversion Tests
    // ------------------------------------------------------------------------

    mod conversion_tests {
        use super::*;
        use std::io::Write;
        use tempfile::NamedTempFile;

        #[test]
        fn test_simple_conversions() {
            assert_eq!(
                LineCommand::Reset.into_command().unwrap(),
                Some(Command::ManualReset)
            );
            assert_eq!(
                LineCommand::Mute.into_command().unwrap(),
                Some(Command::SetSoundEnabled(false))
            );
            assert_eq!(
                LineCommand::Quit.into_command().unwrap(),
                Some(Command::Shutdown)
            );
            assert_eq!(LineCommand::Help.into_command().unwrap(), None);
        }

        #[test]
        fn test_set_conversion() {
            let command = parse_line("set 1 x").unwrap().into_command().unwrap();
            assert_eq!(
                command,
                Some(Command::Configure(DurationInput::new("1", "x")))
            );
        }

        #[test]
        fn test_add_reads_file() {
            let mut file = NamedTempFile::with_suffix(".wav").unwrap();
            file.write_all(b"RIFF").unwrap();

            let command = LineCommand::Add {
                path: file.path().to_path_buf(),
                name: None,
            }
            .into_command()
            .unwrap();

            match command {
                Some(Command::UploadAlarm {
                    index: None,
                    name: None,
                    upload,
                }) => {
                    assert_eq!(upload.mime_type, "audio/wav");
                    assert_eq!(upload.bytes, b"RIFF".to_vec());
                }
                other => panic!("Expected UploadAlarm, got {:?}", other),
            }
        }

        #[test]
        fn test_missing_file_is_sound_error() {
            let result = LineCommand::ResetSound {
                path: PathBuf::from("/definitely/not/here.mp3"),
            }
            .into_command();

            assert!(matches!(
                result,
                Err(InputError::Sound(SoundError::FileNotFound(_)))
            ));
        }

        #[test]
        fn test_suggestions_not_empty() {
            let errors = [
                InputError::UnbalancedQuotes,
                InputError::UnknownCommand("x".to_string()),
                InputError::InvalidIndex("x".to_string()),
                InputError::Sound(SoundError::FileNotFound("x".to_string())),
            ];
            for error in errors {
                assert!(!error.suggestion().is_empty());
            }
        }
    }
}
