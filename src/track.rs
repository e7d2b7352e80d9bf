/// The track module implements the editable working copy of one file and the diff that turns
/// "what the user changed" into a minimal change-set.
///
/// A `QTTrack` keeps two views of every logical concern (mood, energy, note, custom groups,
/// genres): the baseline derived once from the file snapshot, and the live value the UI mutates.
/// The change-set is computed purely from comparing the two; no edit events are recorded.
///
/// Several concerns may be stored in the same physical field (typically the comment field holds
/// the note and every custom group). Each concern only ever rewrites its own slice of that
/// field's values; see [`QTTrack::output`].
use crate::changes::{TagChange, TagChanges};
use crate::common::uniq;
use crate::error::Result;
use crate::file::QuickTagFile;
use crate::frame::FrameName;
use crate::settings::{EnergyEncoding, QuickTagSettings};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct QTTrack {
    file: QuickTagFile,
    settings: Arc<QuickTagSettings>,

    mood: Option<String>,
    energy: u8,
    note: String,
    custom: Vec<Vec<String>>,
    genres: Vec<String>,

    original_mood: Option<String>,
    original_energy: u8,
    original_note: String,
    original_custom: Vec<Vec<String>>,
    original_genres: Vec<String>,
}

impl QTTrack {
    pub fn new(file: QuickTagFile, settings: Arc<QuickTagSettings>) -> QTTrack {
        let mut track = QTTrack {
            file,
            settings,
            mood: None,
            energy: 0,
            note: String::new(),
            custom: vec![],
            genres: vec![],
            original_mood: None,
            original_energy: 0,
            original_note: String::new(),
            original_custom: vec![],
            original_genres: vec![],
        };

        track.original_mood = track.load_mood();
        track.original_energy = track.load_energy();
        track.original_note = track.load_note();
        track.original_custom = track.load_custom();
        track.original_genres = track.load_genres();

        track.mood = track.original_mood.clone();
        track.energy = track.original_energy;
        track.note = track.original_note.clone();
        track.custom = track.original_custom.clone();
        track.genres = track.original_genres.clone();
        track
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }

    pub fn file(&self) -> &QuickTagFile {
        &self.file
    }

    pub fn settings(&self) -> &Arc<QuickTagSettings> {
        &self.settings
    }

    /// Physical field name of a logical frame for this file's format.
    fn field(&self, frame: &FrameName) -> String {
        frame.field(self.file.format)
    }

    // Baseline extraction. These only read the snapshot and settings.

    /// First value of the mood field. Further values are ignored.
    pub fn load_mood(&self) -> Option<String> {
        let field = self.field(&self.settings.mood_tag);
        self.file.tag_values(&field).first().cloned()
    }

    pub fn load_energy(&self) -> u8 {
        match &self.settings.energy_tag.encoding {
            EnergyEncoding::Rating => self.file.rating,
            EnergyEncoding::Symbol { symbol } => {
                let field = self.field(&self.settings.energy_tag.tag);
                match self.file.tag_values(&field).first() {
                    Some(value) => count_symbol(value, symbol),
                    None => 0,
                }
            }
        }
    }

    /// Values of the note field joined with `,`, minus values claimed by a custom group stored in
    /// the same field.
    pub fn load_note(&self) -> String {
        let field = self.field(&self.settings.note_tag.tag);
        let mut note: Vec<&String> = self.file.tag_values(&field).iter().collect();
        for custom in &self.settings.custom {
            if self.field(&custom.tag) == field {
                note.retain(|v| !custom.contains(v));
            }
        }
        note.into_iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }

    /// Per custom group, the values of its field that belong to its vocabulary.
    pub fn load_custom(&self) -> Vec<Vec<String>> {
        self.settings
            .custom
            .iter()
            .map(|custom| {
                let field = self.field(&custom.tag);
                self.file.tag_values(&field).iter().filter(|v| custom.contains(v)).cloned().collect()
            })
            .collect()
    }

    /// File genres, plus the values of the subgenre field when one is configured.
    pub fn load_genres(&self) -> Vec<String> {
        let mut genres = self.file.genres.clone();
        if let Some(subgenre_tag) = &self.settings.subgenre_tag {
            let field = self.field(subgenre_tag);
            for value in self.file.tag_values(&field) {
                if !genres.contains(value) {
                    genres.push(value.clone());
                }
            }
        }
        genres
    }

    pub fn original_mood(&self) -> Option<&str> {
        self.original_mood.as_deref()
    }

    pub fn original_energy(&self) -> u8 {
        self.original_energy
    }

    pub fn original_note(&self) -> &str {
        &self.original_note
    }

    pub fn original_custom(&self) -> &[Vec<String>] {
        &self.original_custom
    }

    pub fn original_genres(&self) -> &[String] {
        &self.original_genres
    }

    // Live values

    pub fn mood(&self) -> Option<&str> {
        self.mood.as_deref()
    }

    pub fn set_mood(&mut self, mood: Option<String>) {
        self.mood = mood;
    }

    pub fn energy(&self) -> u8 {
        self.energy
    }

    pub fn set_energy(&mut self, energy: u8) {
        self.energy = energy;
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Replace the note. Segments are trimmed and empty ones dropped.
    pub fn set_note(&mut self, note: &str) {
        self.note = note_parts(note).join(",");
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Add the genre if absent, otherwise remove it.
    pub fn toggle_genre(&mut self, genre: &str) {
        match self.genres.iter().position(|g| g == genre) {
            Some(i) => {
                self.genres.remove(i);
            }
            None => self.genres.push(genre.to_string()),
        }
    }

    pub fn custom(&self) -> &[Vec<String>] {
        &self.custom
    }

    pub fn custom_values(&self, tag: usize) -> Result<&[String]> {
        self.settings.custom_group(tag)?;
        Ok(self.custom.get(tag).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn has_custom(&self, tag: usize, value: &str) -> bool {
        self.custom.get(tag).is_some_and(|values| values.iter().any(|v| v == value))
    }

    fn custom_mut(&mut self, tag: usize) -> Result<&mut Vec<String>> {
        self.settings.custom_group(tag)?;
        if self.custom.len() <= tag {
            self.custom.resize_with(tag + 1, Vec::new);
        }
        Ok(&mut self.custom[tag])
    }

    pub fn add_custom(&mut self, tag: usize, value: &str) -> Result<()> {
        let values = self.custom_mut(tag)?;
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
        self.sort_custom(tag)
    }

    pub fn remove_custom(&mut self, tag: usize, value: &str) -> Result<()> {
        self.custom_mut(tag)?.retain(|v| v != value);
        Ok(())
    }

    /// Enable or disable a custom value
    pub fn toggle_custom(&mut self, tag: usize, value: &str) -> Result<()> {
        if self.has_custom(tag, value) {
            self.remove_custom(tag, value)
        } else {
            self.add_custom(tag, value)
        }
    }

    /// Order the group's values as declared in its vocabulary, independent of insertion order.
    pub fn sort_custom(&mut self, tag: usize) -> Result<()> {
        let settings = Arc::clone(&self.settings);
        let group = settings.custom_group(tag)?;
        self.custom_mut(tag)?.sort_by_key(|v| group.position(v));
        Ok(())
    }

    /// Every selected custom value across groups, followed by the note parts, de-duplicated.
    pub fn all_custom(&self) -> Vec<String> {
        let values = self.custom.iter().flatten().filter(|v| !v.is_empty()).cloned();
        let note = note_parts(&self.note).into_iter().map(String::from);
        uniq(values.chain(note).collect())
    }

    /// Diff live values against the baseline.
    ///
    /// Steps run in a fixed order: mood, energy, genre, note, custom groups. A custom group whose
    /// field already has a pending raw change in this call is merged into it: the pending values
    /// minus this group's vocabulary, followed by the group's live values. Otherwise the group
    /// starts from the stored values of the field minus its vocabulary.
    pub fn output(&self) -> TagChanges {
        let settings = &self.settings;
        let mut changes: Vec<TagChange> = vec![];

        // Mood
        if self.mood != self.original_mood {
            changes.push(TagChange::raw(self.field(&settings.mood_tag), self.mood.iter().cloned().collect()));
        }

        // Energy
        if self.energy != self.original_energy {
            match &settings.energy_tag.encoding {
                EnergyEncoding::Rating => changes.push(TagChange::Rating { value: self.energy }),
                EnergyEncoding::Symbol { symbol } => {
                    let value = match self.energy {
                        0 => vec![],
                        energy => vec![symbol.repeat(energy as usize)],
                    };
                    changes.push(TagChange::raw(self.field(&settings.energy_tag.tag), value));
                }
            }
        }

        // Genre
        if normalized_genres(&self.genres) != normalized_genres(&self.original_genres) {
            let genres = cleaned_genres(&self.genres);
            match &settings.subgenre_tag {
                Some(subgenre_tag) => {
                    let (subgenres, genres): (Vec<String>, Vec<String>) = genres.into_iter().partition(|g| settings.is_subgenre(g));
                    changes.push(TagChange::Genre { value: genres });
                    changes.push(TagChange::raw(self.field(subgenre_tag), subgenres));
                }
                None => changes.push(TagChange::Genre { value: genres }),
            }
        }

        // Note
        if self.note != self.original_note {
            let field = self.field(&settings.note_tag.tag);
            let original: Vec<&str> = self.original_note.split(',').collect();
            let mut value: Vec<String> = self.file.tag_values(&field).iter().filter(|v| !original.contains(&v.as_str())).cloned().collect();
            value.extend(note_parts(&self.note).into_iter().map(String::from));
            changes.push(TagChange::raw(field, value));
        }

        // Custom groups
        for (i, group) in settings.custom.iter().enumerate() {
            let live = self.custom.get(i).map(Vec::as_slice).unwrap_or(&[]);
            let original = self.original_custom.get(i).map(Vec::as_slice).unwrap_or(&[]);
            if live == original {
                continue;
            }

            let field = self.field(&group.tag);
            let mut values: Vec<String> = vec![];
            let mut existing = changes.iter().position(|c| c.raw_tag() == Some(field.as_str()));
            if existing.is_none() {
                values = self.file.tag_values(&field).iter().filter(|v| !group.contains(v)).cloned().collect();
            }
            while let Some(index) = existing {
                debug!("Merging custom group {:?} into pending change of {}", group.name, field);
                if let TagChange::Raw { value, .. } = changes.remove(index) {
                    values.extend(value.into_iter().filter(|v| !group.contains(v)));
                }
                existing = changes.iter().position(|c| c.raw_tag() == Some(field.as_str()));
            }
            values.extend(live.iter().cloned());
            changes.push(TagChange::raw(field, values));
        }

        TagChanges {
            changes,
            path: self.file.path.clone(),
            separators: settings.separators.clone(),
            id3v24: settings.id3v24,
            id3_comm_lang: settings.id3_comm_lang.clone(),
        }
    }

    /// Whether the track has changes
    pub fn is_changed(&self) -> bool {
        !self.output().is_empty()
    }
}

/// Occurrences of the symbol anywhere in the value, not only as a prefix.
fn count_symbol(value: &str, symbol: &str) -> u8 {
    if symbol.is_empty() {
        return 0;
    }
    value.matches(symbol).count().min(u8::MAX as usize) as u8
}

pub(crate) fn note_parts(note: &str) -> Vec<&str> {
    note.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

fn cleaned_genres(genres: &[String]) -> Vec<String> {
    uniq(genres.iter().map(|g| g.trim().to_string()).filter(|g| !g.is_empty()).collect())
}

// Order-insensitive comparison key
fn normalized_genres(genres: &[String]) -> Vec<String> {
    let mut genres = cleaned_genres(genres);
    genres.sort();
    genres
}
