use crate::frame::AudioFileFormat;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Snapshot of one file's tags as delivered by the loading backend. Never mutated once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickTagFile {
    pub path: PathBuf,
    pub format: AudioFileFormat,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub bpm: Option<i64>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub key: Option<String>,
}

impl QuickTagFile {
    pub fn new(path: impl AsRef<Path>, format: AudioFileFormat) -> QuickTagFile {
        QuickTagFile {
            path: path.as_ref().to_path_buf(),
            format,
            title: String::new(),
            artists: vec![],
            genres: vec![],
            bpm: None,
            rating: 0,
            tags: HashMap::new(),
            year: None,
            key: None,
        }
    }

    /// Values of a physical field. An absent field is empty.
    pub fn tag_values(&self, field: &str) -> &[String] {
        self.tags.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

// A field can arrive either as a single string or as a list
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: HashMap<String, OneOrMany> = HashMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(k, v)| {
            let values = match v {
                OneOrMany::One(s) => vec![s],
                OneOrMany::Many(values) => values,
            };
            (k, values)
        })
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickTagData {
    pub files: Vec<QuickTagFile>,
    #[serde(default)]
    pub failed: Vec<QuickTagFailed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickTagFailed {
    pub path: PathBuf,
    pub error: String,
}

impl QuickTagFailed {
    pub fn new(path: impl AsRef<Path>, error: impl Into<String>) -> QuickTagFailed {
        QuickTagFailed { path: path.as_ref().into(), error: error.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scalar_and_list_tags() {
        let file: QuickTagFile = serde_json::from_str(
            r#"{
                "path": "/music/a.flac",
                "format": "flac",
                "title": "A",
                "artists": ["X"],
                "genres": [],
                "rating": 3,
                "tags": {"ENERGY": "***", "COMMENT": ["foo", "bar"]}
            }"#,
        )
        .unwrap();
        assert_eq!(file.tag_values("ENERGY"), ["***"]);
        assert_eq!(file.tag_values("COMMENT"), ["foo", "bar"]);
        assert!(file.tag_values("MOOD").is_empty());
        assert_eq!(file.rating, 3);
        assert_eq!(file.bpm, None);
    }

    #[test]
    fn test_unknown_format_fails() {
        let result: Result<QuickTagFile, _> = serde_json::from_str(r#"{"path": "/music/a.wma", "format": "wma"}"#);
        assert!(result.is_err());
    }
}
