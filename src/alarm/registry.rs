//! Alarm registry with a rotating cursor.
//!
//! Entries rotate in insertion order. The cursor always points at the alarm
//! that plays on the next expiry and stays in range as entries come and go.

use crate::sound::{SoundHandle, SoundSource};

/// Name given to alarms without a usable name.
pub const UNNAMED_ALARM: &str = "Unnamed Alarm";

/// A named alarm sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmEntry {
    name: String,
    sound: SoundHandle,
}

impl AlarmEntry {
    pub fn new(name: impl Into<String>, sound: SoundHandle) -> Self {
        Self {
            name: name.into(),
            sound,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sound(&self) -> &SoundHandle {
        &self.sound
    }

    /// Returns a playable source for this entry.
    pub fn source(&self) -> SoundSource {
        SoundSource::Uploaded(self.sound.clone())
    }
}

/// Where an upload ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSlot {
    /// An existing slot was overwritten
    Replaced(usize),
    /// A new slot was added at the end
    Appended(usize),
}

impl UploadSlot {
    pub fn index(&self) -> usize {
        match self {
            Self::Replaced(index) | Self::Appended(index) => *index,
        }
    }
}

/// Ordered alarm entries plus the rotation cursor.
#[derive(Debug, Clone, Default)]
pub struct AlarmRegistry {
    entries: Vec<AlarmEntry>,
    cursor: usize,
}

impl AlarmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the alarm that plays next. Meaningless while empty.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[AlarmEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&AlarmEntry> {
        self.entries.get(index)
    }

    /// Returns the entry under the cursor.
    pub fn current(&self) -> Option<&AlarmEntry> {
        self.entries.get(self.cursor)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Appends a new entry and returns its index.
    pub fn add_entry(&mut self, name: Option<&str>, sound: SoundHandle) -> usize {
        let name = resolve_alarm_name(name, sound.file_name());
        self.entries.push(AlarmEntry::new(name, sound));
        self.entries.len() - 1
    }

    /// Overwrites slot `index` in place if it exists, otherwise appends.
    pub fn upload(
        &mut self,
        index: Option<usize>,
        name: Option<&str>,
        sound: SoundHandle,
    ) -> UploadSlot {
        match index {
            Some(index) if index < self.entries.len() => {
                let name = resolve_alarm_name(name, sound.file_name());
                self.entries[index] = AlarmEntry::new(name, sound);
                UploadSlot::Replaced(index)
            }
            _ => UploadSlot::Appended(self.add_entry(name, sound)),
        }
    }

    /// Removes the entry at `index` and re-wraps the cursor.
    ///
    /// Returns `None` without changes if the index is out of range.
    pub fn remove_entry(&mut self, index: usize) -> Option<AlarmEntry> {
        if index >= self.entries.len() {
            return None;
        }

        let removed = self.entries.remove(index);
        self.cursor = if self.entries.is_empty() {
            0
        } else {
            self.cursor % self.entries.len()
        };
        Some(removed)
    }

    /// Renames the entry at `index`; an empty name becomes `UNNAMED_ALARM`.
    ///
    /// Returns whether the renamed entry is under the cursor, or `None` if
    /// the index is out of range.
    pub fn rename_entry(&mut self, index: usize, name: &str) -> Option<bool> {
        let entry = self.entries.get_mut(index)?;
        entry.name = if name.is_empty() {
            UNNAMED_ALARM.to_string()
        } else {
            name.to_string()
        };
        Some(index == self.cursor)
    }

    /// Returns the entry under the cursor and moves the cursor forward.
    pub fn take_next(&mut self) -> Option<AlarmEntry> {
        let entry = self.entries.get(self.cursor)?.clone();
        self.cursor = (self.cursor + 1) % self.entries.len();
        Some(entry)
    }

    /// Moves the cursor forward without playing and returns the new current
    /// entry.
    pub fn advance(&mut self) -> Option<&AlarmEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.entries.len();
        self.entries.get(self.cursor)
    }
}

/// Picks the display name for an uploaded alarm.
///
/// A non-empty typed name wins; otherwise the file name without its final
/// extension; otherwise `UNNAMED_ALARM`.
pub fn resolve_alarm_name(name: Option<&str>, file_name: &str) -> String {
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    let stem = strip_extension(file_name);
    if stem.is_empty() {
        UNNAMED_ALARM.to_string()
    } else {
        stem.to_string()
    }
}

/// Strips a trailing `.ext` where `ext` contains no `/` or `.`.
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) if dot + 1 < file_name.len() && !file_name[dot + 1..].contains('/') => {
            &file_name[..dot]
        }
        _ => file_name,
    }
}
