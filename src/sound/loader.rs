//! Loading user-supplied audio resources.
//!
//! Uploads are accepted purely on their MIME type: anything that does not
//! start with `audio/` is rejected with `SoundError::UnsupportedFileType`.
//! Whether the bytes actually decode is only discovered at playback time.

use std::path::Path;

use tracing::debug;

use super::error::SoundError;
use super::source::SoundHandle;

/// MIME type used when a file extension is not recognized.
const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// Known audio extensions and their MIME types.
const AUDIO_MIME_TYPES: &[(&str, &str)] = &[
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("oga", "audio/ogg"),
    ("opus", "audio/opus"),
    ("flac", "audio/flac"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("aif", "audio/aiff"),
    ("aiff", "audio/aiff"),
    ("webm", "audio/webm"),
];

/// A file selected by the user, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUpload {
    /// File name including extension.
    pub file_name: String,
    /// Reported MIME type.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl AudioUpload {
    /// Creates an upload from raw parts.
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, guessing its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, SoundError> {
        let bytes = std::fs::read(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            mime_type: guess_mime_type(path).to_string(),
            file_name,
            bytes,
        })
    }
}

/// Guesses a MIME type from the file extension.
#[must_use]
pub fn guess_mime_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension() else {
        return UNKNOWN_MIME_TYPE;
    };
    let ext = ext.to_string_lossy().to_lowercase();

    AUDIO_MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map_or(UNKNOWN_MIME_TYPE, |(_, mime)| mime)
}

/// Turns an upload into a playable handle.
///
/// # Errors
///
/// Returns `SoundError::UnsupportedFileType` if the MIME type does not
/// indicate an audio resource.
pub fn load_audio_resource(upload: AudioUpload) -> Result<SoundHandle, SoundError> {
    if !upload.mime_type.starts_with("audio/") {
        return Err(SoundError::UnsupportedFileType {
            file_name: upload.file_name,
            mime_type: upload.mime_type,
        });
    }

    debug!(
        "Loaded audio resource '{}' ({}, {} bytes)",
        upload.file_name,
        upload.mime_type,
        upload.bytes.len()
    );

    Ok(SoundHandle::new(upload.file_name, upload.mime_type, upload.bytes))
}
