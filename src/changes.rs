use crate::file::QuickTagFile;
use crate::frame::Separators;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Single tag mutation sent to the save backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum TagChange {
    /// Replace the whole value list of a physical field
    Raw { tag: String, value: Vec<String> },
    Rating { value: u8 },
    Genre { value: Vec<String> },
}

impl TagChange {
    pub fn raw(tag: impl Into<String>, value: Vec<String>) -> TagChange {
        TagChange::Raw { tag: tag.into(), value }
    }

    /// Physical field targeted by a raw change.
    pub fn raw_tag(&self) -> Option<&str> {
        match self {
            TagChange::Raw { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

/// Change-set for one file, passed verbatim to the save backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagChanges {
    pub changes: Vec<TagChange>,
    pub path: PathBuf,
    pub separators: Separators,
    pub id3v24: bool,
    pub id3_comm_lang: Option<String>,
}

impl TagChanges {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Replay the changes on a snapshot the way the backend commits them to the file, producing
    /// the snapshot it would report back after saving.
    pub fn apply_to(&self, file: &QuickTagFile) -> QuickTagFile {
        let mut out = file.clone();
        for change in &self.changes {
            match change {
                TagChange::Raw { tag, value } => {
                    if value.is_empty() {
                        out.tags.remove(tag);
                    } else {
                        out.tags.insert(tag.clone(), value.clone());
                    }
                }
                TagChange::Rating { value } => out.rating = *value,
                TagChange::Genre { value } => out.genres = value.clone(),
            }
        }
        out
    }
}
