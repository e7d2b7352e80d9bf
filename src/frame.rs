/// The frame module resolves a logical tag concern to the physical field name used by each of the
/// three tag families (ID3 frames, Vorbis comments and MP4 atoms).
///
/// MP4 names may be written in a shorthand form in the settings: a `----:` freeform marker and an
/// `iTunes:` prefix standing for the `com.apple.iTunes:` namespace. Those are expanded by
/// [`remove_abstractions`] whenever a logical name becomes a key into a file's tag map.
use crate::error::{QuickTagExpectedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFileFormat {
    Mp3,
    Aiff,
    Aif,
    Wav,
    Flac,
    Ogg,
    Mp4,
    M4a,
}

/// Tag family shared by a group of container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagFormat {
    Id3,
    Vorbis,
    Mp4,
}

impl AudioFileFormat {
    pub fn tag_format(self) -> TagFormat {
        match self {
            AudioFileFormat::Mp3 | AudioFileFormat::Aiff | AudioFileFormat::Aif | AudioFileFormat::Wav => TagFormat::Id3,
            AudioFileFormat::Flac | AudioFileFormat::Ogg => TagFormat::Vorbis,
            AudioFileFormat::Mp4 | AudioFileFormat::M4a => TagFormat::Mp4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AudioFileFormat::Mp3 => "mp3",
            AudioFileFormat::Aiff => "aiff",
            AudioFileFormat::Aif => "aif",
            AudioFileFormat::Wav => "wav",
            AudioFileFormat::Flac => "flac",
            AudioFileFormat::Ogg => "ogg",
            AudioFileFormat::Mp4 => "mp4",
            AudioFileFormat::M4a => "m4a",
        }
    }
}

impl FromStr for AudioFileFormat {
    type Err = QuickTagExpectedError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "mp3" | "id3" => Ok(AudioFileFormat::Mp3),
            "aiff" => Ok(AudioFileFormat::Aiff),
            "aif" => Ok(AudioFileFormat::Aif),
            "wav" => Ok(AudioFileFormat::Wav),
            "flac" => Ok(AudioFileFormat::Flac),
            "ogg" | "vorbis" => Ok(AudioFileFormat::Ogg),
            "mp4" => Ok(AudioFileFormat::Mp4),
            "m4a" => Ok(AudioFileFormat::M4a),
            _ => Err(QuickTagExpectedError::InvalidFileFormat { format: s.to_string() }),
        }
    }
}

impl fmt::Display for AudioFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frame name in different formats
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameName {
    pub id3: String,
    pub vorbis: String,
    pub mp4: String,
}

impl FrameName {
    pub fn new(id3: impl Into<String>, vorbis: impl Into<String>, mp4: impl Into<String>) -> FrameName {
        FrameName { id3: id3.into(), vorbis: vorbis.into(), mp4: mp4.into() }
    }

    /// Same name for all formats
    pub fn same(name: impl Into<String>) -> FrameName {
        let name = name.into();
        FrameName { id3: name.clone(), vorbis: name.clone(), mp4: name }
    }

    /// Stored (possibly abstracted) name for the format.
    pub fn by_format(&self, format: AudioFileFormat) -> &str {
        match format.tag_format() {
            TagFormat::Id3 => &self.id3,
            TagFormat::Vorbis => &self.vorbis,
            TagFormat::Mp4 => &self.mp4,
        }
    }

    pub fn by_format_str(&self, format: &str) -> Result<&str> {
        let format: AudioFileFormat = format.parse()?;
        Ok(self.by_format(format))
    }

    /// Whether both names resolve to the same physical field for any tag family.
    pub fn shares_field(&self, other: &FrameName) -> bool {
        [AudioFileFormat::Mp3, AudioFileFormat::Flac, AudioFileFormat::Mp4].into_iter().any(|format| self.field(format) == other.field(format))
    }

    /// Literal key into a file's tag map.
    pub fn field(&self, format: AudioFileFormat) -> String {
        remove_abstractions(format, self.by_format(format))
    }
}

pub fn remove_abstractions(format: AudioFileFormat, name: &str) -> String {
    if format.tag_format() != TagFormat::Mp4 || name.is_empty() {
        return name.to_string();
    }
    let name = name.replacen("----:", "", 1);
    if name.starts_with("iTunes:") {
        return format!("com.apple.{name}");
    }
    name
}

/// Join/split delimiter for multi-value text fields, per tag family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Separators {
    #[serde(default)]
    pub id3: Option<String>,
    #[serde(default)]
    pub vorbis: Option<String>,
    #[serde(default)]
    pub mp4: Option<String>,
}

impl Default for Separators {
    fn default() -> Self {
        Separators { id3: Some(", ".to_string()), vorbis: None, mp4: Some(", ".to_string()) }
    }
}

impl Separators {
    pub fn by_format(&self, format: AudioFileFormat) -> Option<&str> {
        match format.tag_format() {
            TagFormat::Id3 => self.id3.as_deref(),
            TagFormat::Vorbis => self.vorbis.as_deref(),
            TagFormat::Mp4 => self.mp4.as_deref(),
        }
    }
}
