//! Sound system error types.
//!
//! This module defines the error types for loading and playing alarm
//! sounds. None of them is fatal: the countdown keeps running when a
//! sound cannot be loaded or played.

use thiserror::Error;

/// Errors that can occur in the sound system.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SoundError {
    /// The uploaded file is not an audio resource.
    #[error("オーディオファイルを選択してください: {file_name} ({mime_type})")]
    UnsupportedFileType {
        /// Name of the rejected file.
        file_name: String,
        /// MIME type reported for the file.
        mime_type: String,
    },

    /// Audio device is not available (e.g., no speakers connected).
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found or could not be read.
    #[error("サウンドファイルが読み込めません: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio data.
    #[error("サウンドファイルのデコードに失敗しました: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("オーディオストリームの作成に失敗しました: {0}")]
    StreamError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error rejects an upload.
    #[must_use]
    pub fn is_unsupported_file_type(&self) -> bool {
        matches!(self, Self::UnsupportedFileType { .. })
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::UnsupportedFileType { .. } => "mp3 / wav / ogg などの音声ファイルを指定してください",
            Self::DeviceNotAvailable(_) => "オーディオデバイスを接続してください",
            Self::FileNotFound(_) => "ファイルのパスを確認してください",
            Self::DecodeError(_) => "サウンドファイルが破損している可能性があります",
            Self::StreamError(_) => "オーディオ設定を確認してください",
        }
    }
}
