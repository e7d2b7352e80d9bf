/// The settings module describes which logical tag concerns quicktag edits and where each of them
/// is stored: the note field, the mood vocabulary, the energy encoding, the genre vocabulary and the
/// user-defined custom groups.
///
/// Settings are read once, either from the JSON the UI persists or from a TOML file, and then
/// shared read-only between every loaded track.
use crate::common::project_dirs;
use crate::error::{QuickTagError, QuickTagExpectedError, Result};
use crate::frame::{FrameName, Separators};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickTagSettings {
    pub id3v24: bool,
    pub recursive: bool,
    pub autosave: bool,
    pub sort_descending: bool,
    pub sort_option: SortOption,
    pub separators: Separators,
    pub note_tag: NoteTagSettings,
    pub moods: Vec<QuickTagMood>,
    pub mood_tag: FrameName,
    pub energy_tag: EnergyTag,
    pub genres: Vec<QuickTagGenre>,
    pub subgenre_tag: Option<FrameName>,
    pub custom: Vec<QuickTagCustom>,
    pub id3_comm_lang: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    #[default]
    Title,
    Artist,
    Bpm,
    Genre,
    Year,
    Key,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteTagSettings {
    pub tag: FrameName,
}

impl Default for NoteTagSettings {
    fn default() -> Self {
        NoteTagSettings { tag: comment_frame() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickTagMood {
    pub mood: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnergyEncoding {
    /// Native rating field of the file
    Rating,
    /// Symbol repeated `energy` times in a text field
    Symbol { symbol: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEnergyTag", into = "RawEnergyTag")]
pub struct EnergyTag {
    pub encoding: EnergyEncoding,
    pub tag: FrameName,
}

impl Default for EnergyTag {
    fn default() -> Self {
        EnergyTag { encoding: EnergyEncoding::Rating, tag: FrameName::new("TCOM", "COMPOSER", "©wrt") }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EnergyKind {
    Rating,
    Symbol,
}

// Wire shape of the energy settings: `{ type, symbol, tag }`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEnergyTag {
    #[serde(rename = "type")]
    kind: EnergyKind,
    #[serde(default = "default_symbol")]
    symbol: String,
    tag: FrameName,
}

fn default_symbol() -> String {
    "*".to_string()
}

impl From<RawEnergyTag> for EnergyTag {
    fn from(raw: RawEnergyTag) -> Self {
        let encoding = match raw.kind {
            EnergyKind::Rating => EnergyEncoding::Rating,
            EnergyKind::Symbol => EnergyEncoding::Symbol { symbol: raw.symbol },
        };
        EnergyTag { encoding, tag: raw.tag }
    }
}

impl From<EnergyTag> for RawEnergyTag {
    fn from(tag: EnergyTag) -> Self {
        match tag.encoding {
            EnergyEncoding::Rating => RawEnergyTag { kind: EnergyKind::Rating, symbol: default_symbol(), tag: tag.tag },
            EnergyEncoding::Symbol { symbol } => RawEnergyTag { kind: EnergyKind::Symbol, symbol, tag: tag.tag },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickTagGenre {
    pub genre: String,
    #[serde(default)]
    pub subgenres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickTagCustom {
    pub name: String,
    pub tag: FrameName,
    #[serde(default)]
    pub values: Vec<QuickTagCustomValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickTagCustomValue {
    pub val: String,
}

impl QuickTagCustom {
    pub fn new(name: impl Into<String>, tag: FrameName, values: &[&str]) -> QuickTagCustom {
        QuickTagCustom {
            name: name.into(),
            tag,
            values: values.iter().map(|v| QuickTagCustomValue { val: v.to_string() }).collect(),
        }
    }

    /// Whether the value belongs to this group's vocabulary. Case-sensitive.
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.val == value)
    }

    /// Index of the value in the declared vocabulary.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v.val == value)
    }
}

/// Configuration that the diff engine tolerates but cannot attribute unambiguously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAmbiguity {
    EmptyCustomGroup { group: String },
    OverlappingCustomValue { value: String, first: String, second: String },
}

impl QuickTagSettings {
    pub fn from_json(data: &str) -> Result<QuickTagSettings> {
        let settings: QuickTagSettings = serde_json::from_str(data)?;
        settings.warn_ambiguities();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Default location of the settings file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Read settings from a TOML file, or from the default location when no path is given.
    pub fn parse(config_path_override: Option<&Path>) -> Result<QuickTagSettings> {
        let cfgpath = match config_path_override {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };
        debug!("Loading quicktag settings from {}", cfgpath.display());

        let text = match std::fs::read_to_string(&cfgpath) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(QuickTagExpectedError::ConfigNotFound { path: cfgpath }.into());
            }
            Err(e) => return Err(QuickTagError::Io(e)),
        };

        let settings: QuickTagSettings = toml::from_str(&text).map_err(|e| QuickTagExpectedError::ConfigDecode {
            path: cfgpath.clone(),
            message: e.to_string(),
        })?;
        settings.warn_ambiguities();
        Ok(settings)
    }

    pub fn custom_group(&self, index: usize) -> Result<&QuickTagCustom> {
        self.custom.get(index).ok_or_else(|| QuickTagExpectedError::CustomGroupDoesNotExist { index }.into())
    }

    /// Whether the genre is listed as a subgenre of any configured genre.
    pub fn is_subgenre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g.subgenres.iter().any(|s| s == genre))
    }

    /// Groups with no vocabulary, and values claimed by two groups that resolve to the same
    /// physical field for at least one format. A shared value ends up attributed to whichever
    /// group is diffed last.
    pub fn ambiguities(&self) -> Vec<SettingsAmbiguity> {
        let mut out = vec![];
        for (i, group) in self.custom.iter().enumerate() {
            if group.values.is_empty() {
                out.push(SettingsAmbiguity::EmptyCustomGroup { group: group.name.clone() });
            }
            for other in &self.custom[i + 1..] {
                if !other.tag.shares_field(&group.tag) {
                    continue;
                }
                for value in &group.values {
                    if other.contains(&value.val) {
                        out.push(SettingsAmbiguity::OverlappingCustomValue {
                            value: value.val.clone(),
                            first: group.name.clone(),
                            second: other.name.clone(),
                        });
                    }
                }
            }
        }
        out
    }

    pub fn warn_ambiguities(&self) {
        for ambiguity in self.ambiguities() {
            match ambiguity {
                SettingsAmbiguity::EmptyCustomGroup { group } => {
                    warn!("Custom tag group {group:?} has no values");
                }
                SettingsAmbiguity::OverlappingCustomValue { value, first, second } => {
                    warn!("Value {value:?} is in both {first:?} and {second:?} which share a tag field; {second:?} takes precedence");
                }
            }
        }
    }
}

fn comment_frame() -> FrameName {
    FrameName::new("COMM", "COMMENT", "©cmt")
}

impl Default for QuickTagSettings {
    fn default() -> Self {
        let moods = [
            ("Happy", "amber"),
            ("Sad", "indigo"),
            ("Bright", "green"),
            ("Dark", "deep-purple"),
            ("Angry", "red"),
            ("Chill", "teal"),
            ("Lovely", "pink"),
            ("Powerful", "light-blue"),
            ("Sexy", "purple"),
        ]
        .into_iter()
        .map(|(mood, color)| QuickTagMood { mood: mood.to_string(), color: color.to_string() })
        .collect();

        let genres = [
            "2-step", "Acid", "Breakbeat", "Disco", "Drum & Bass", "Electro", "Funk", "Hardcore", "Hiphop", "House", "Industrial", "Jungle", "Latin",
            "Minimal", "Nu-Disco", "Oldies", "Pop", "Reggae", "Rock", "Techno", "Trance",
        ]
        .into_iter()
        .map(|genre| QuickTagGenre {
            genre: genre.to_string(),
            subgenres: match genre {
                "Electro" => vec!["House".to_string(), "Dubstep".to_string(), "EDM".to_string()],
                _ => vec![],
            },
        })
        .collect();

        let custom = vec![
            QuickTagCustom::new(
                "Vibe",
                comment_frame(),
                &["Afro", "Asian", "Arabic", "Classic", "Dirty", "Etnic", "Funky", "Gangsta", "Glitchy", "Melodic", "Sensual", "Soulful"],
            ),
            QuickTagCustom::new("Situation", comment_frame(), &["Start", "Build", "Peak", "Sustain", "Release"]),
            QuickTagCustom::new(
                "Instruments",
                comment_frame(),
                &["Vocals", "Bass Heavy", "Congas", "Guitar", "Horns", "Organ", "Piano", "Strings", "Sax"],
            ),
        ];

        QuickTagSettings {
            id3v24: false,
            recursive: false,
            autosave: false,
            sort_descending: false,
            sort_option: SortOption::Title,
            separators: Separators::default(),
            note_tag: NoteTagSettings::default(),
            moods,
            mood_tag: FrameName::new("TMOO", "MOOD", "iTunes:MOOD"),
            energy_tag: EnergyTag::default(),
            genres,
            subgenre_tag: None,
            custom,
            id3_comm_lang: None,
        }
    }
}
