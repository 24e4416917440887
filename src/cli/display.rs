//! Display utilities for the alarm timer CLI.
//!
//! This module provides formatted output for:
//! - The countdown and the window-title line
//! - Pause state and sound toggle notices
//! - The alarm list and command help
//! - Error messages

/// Title shown before any alarm name is known.
pub const INITIAL_TITLE: &str = "Adjustable Timer";

/// Marker printed in front of a highlighted title.
const HIGHLIGHT_MARKER: &str = "[!]";

const HELP_TEXT: &str = "\
コマンド:
  (Enter) / r            リセット（リセット音を鳴らし、次のアラームへ進む）
  p                      一時停止 / 再開
  set M [S]              時間を設定して再スタート
  add PATH [NAME]        アラーム音を追加
  load INDEX PATH [NAME] 指定番号のアラーム音を差し替え（範囲外なら追加）
  rm INDEX               アラームを削除
  rename INDEX [NAME]    アラーム名を変更
  reset-sound PATH       リセット音を変更
  mute / unmute          サウンドのオフ / オン
  list                   アラーム一覧
  help                   このヘルプ
  q                      終了";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats the countdown as `MM:SS`.
    pub fn format_countdown(minutes: &str, seconds: &str) -> String {
        format!("{}:{}", minutes, seconds)
    }

    /// Formats the window-title line for an alarm label.
    pub fn format_title(name: &str, highlighted: bool) -> String {
        if highlighted {
            format!("{} {} - Timer", HIGHLIGHT_MARKER, name)
        } else {
            format!("{} - Timer", name)
        }
    }

    /// Formats the pause state line.
    pub fn format_pause_state(label: &str, paused: bool) -> String {
        if paused {
            format!("|| 一時停止しました [p: {}]", label)
        } else {
            format!("> 実行中 [p: {}]", label)
        }
    }

    /// Formats the sound toggle notice.
    pub fn format_sound_toggle(enabled: bool) -> String {
        if enabled {
            "サウンド: オン".to_string()
        } else {
            "サウンド: オフ".to_string()
        }
    }

    /// Formats an upload rejection alert.
    pub fn format_upload_rejected(file_name: &str, message: &str) -> String {
        format!("! {} を読み込めませんでした: {}", file_name, message)
    }

    /// Formats the alarm list, marking the entry that plays next.
    pub fn format_alarm_list(names: &[String], cursor: usize) -> Vec<String> {
        if names.is_empty() {
            return vec!["アラーム未登録（デフォルトのアラームを使用）".to_string()];
        }

        names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let marker = if index == cursor { ">" } else { " " };
                format!("{} {}: {}", marker, index, name)
            })
            .collect()
    }

    /// Returns the command help text.
    pub fn help_text() -> &'static str {
        HELP_TEXT
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Shows an error message with a hint.
    pub fn show_error_with_suggestion(message: &str, suggestion: &str) {
        eprintln!("エラー: {}", message);
        eprintln!("  ヒント: {}", suggestion);
    }
}

// ============================================================================
// Tests
// ============================================================================
