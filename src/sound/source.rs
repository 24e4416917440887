//! Sound source management.
//!
//! A sound is either a built-in tone synthesized at playback time or an
//! uploaded audio resource held in memory.

use std::fmt;
use std::sync::Arc;

/// Handle to an uploaded, playable audio resource.
///
/// The audio bytes are shared by reference count so a handle can be cloned
/// into a play request while the owning alarm entry keeps its own copy. The
/// bytes are released once the entry and any in-flight playback drop theirs.
#[derive(Clone, PartialEq, Eq)]
pub struct SoundHandle {
    file_name: String,
    mime_type: String,
    data: Arc<[u8]>,
}

impl SoundHandle {
    /// Creates a handle from already validated audio bytes.
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: Arc::from(data),
        }
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the MIME type the resource was accepted with.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the shared audio bytes.
    #[must_use]
    pub fn data(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    /// Returns the size of the audio data in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the handle carries no audio bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for SoundHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundHandle")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A sine tone generated by the player.
    Tone {
        /// Display name of the tone (e.g., "default alarm").
        name: String,
        /// Tone frequency in hertz.
        frequency_hz: u32,
        /// How long the tone lasts.
        duration_ms: u64,
    },
    /// An audio resource supplied by the user.
    Uploaded(SoundHandle),
}

impl SoundSource {
    /// Creates a new tone source.
    #[must_use]
    pub fn tone(name: impl Into<String>, frequency_hz: u32, duration_ms: u64) -> Self {
        Self::Tone {
            name: name.into(),
            frequency_hz,
            duration_ms,
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tone { name, .. } => name,
            Self::Uploaded(handle) => handle.file_name(),
        }
    }

    /// Returns true if this is a built-in tone.
    #[must_use]
    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone { .. })
    }

    /// Returns true if this is an uploaded resource.
    #[must_use]
    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded(_))
    }

    /// Returns the uploaded handle, if any.
    #[must_use]
    pub fn handle(&self) -> Option<&SoundHandle> {
        match self {
            Self::Uploaded(handle) => Some(handle),
            Self::Tone { .. } => None,
        }
    }
}

impl From<SoundHandle> for SoundSource {
    fn from(handle: SoundHandle) -> Self {
        Self::Uploaded(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_source_tone() {
        let source = SoundSource::tone("beep", 880, 500);
        assert!(source.is_tone());
        assert!(!source.is_uploaded());
        assert_eq!(source.name(), "beep");
        assert!(source.handle().is_none());
    }

    #[test]
    fn test_sound_source_uploaded() {
        let handle = SoundHandle::new("chime.mp3", "audio/mpeg", vec![1, 2, 3]);
        let source = SoundSource::from(handle.clone());
        assert!(source.is_uploaded());
        assert_eq!(source.name(), "chime.mp3");
        assert_eq!(source.handle(), Some(&handle));
    }

    #[test]
    fn test_handle_shares_bytes() {
        let handle = SoundHandle::new("a.wav", "audio/wav", vec![0u8; 16]);
        let cloned = handle.clone();

        assert_eq!(handle.len(), 16);
        assert!(!handle.is_empty());
        assert!(Arc::ptr_eq(&handle.data(), &cloned.data()));
    }

    #[test]
    fn test_handle_debug_hides_bytes() {
        let handle = SoundHandle::new("a.wav", "audio/wav", vec![7u8; 4]);
        let debug_str = format!("{:?}", handle);
        assert!(debug_str.contains("a.wav"));
        assert!(debug_str.contains("bytes: 4"));
    }
}
