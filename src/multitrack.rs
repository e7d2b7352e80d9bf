/// The multitrack module presents a selection of tracks as one editable track for bulk editing.
///
/// Reads return a value only when every member agrees, otherwise a neutral value. Writes fan out
/// to every member. Toggles on a mixed selection resolve to a removal when any member has the
/// value, so repeating a toggle always converges.
use crate::changes::TagChanges;
use crate::error::Result;
use crate::track::QTTrack;
use std::path::Path;

/// Mood shared by every track, `None` when mixed or empty.
pub fn unanimous_mood(tracks: &[QTTrack]) -> Option<&str> {
    let (first, rest) = tracks.split_first()?;
    let mood = first.mood()?;
    rest.iter().all(|t| t.mood() == Some(mood)).then_some(mood)
}

/// Energy shared by every track, 0 when mixed or empty.
pub fn unanimous_energy(tracks: &[QTTrack]) -> u8 {
    match tracks.split_first() {
        Some((first, rest)) if rest.iter().all(|t| t.energy() == first.energy()) => first.energy(),
        _ => 0,
    }
}

/// Note shared by every track, empty when mixed or empty.
pub fn unanimous_note(tracks: &[QTTrack]) -> &str {
    match tracks.split_first() {
        Some((first, rest)) if rest.iter().all(|t| t.note() == first.note()) => first.note(),
        _ => "",
    }
}

/// Genres present on every track, in the first track's order.
pub fn common_genres(tracks: &[QTTrack]) -> Vec<String> {
    let Some((first, rest)) = tracks.split_first() else {
        return vec![];
    };
    first.genres().iter().filter(|g| rest.iter().all(|t| t.has_genre(g))).cloned().collect()
}

/// Whether every track has the custom value. An empty selection has nothing toggled on, so this
/// is false rather than vacuously true.
pub fn all_have_custom(tracks: &[QTTrack], tag: usize, value: &str) -> bool {
    !tracks.is_empty() && tracks.iter().all(|t| t.has_custom(tag, value))
}

#[derive(Debug, Clone, Default)]
pub struct QTMultiTrack {
    tracks: Vec<QTTrack>,
}

impl QTMultiTrack {
    pub fn new() -> QTMultiTrack {
        QTMultiTrack::default()
    }

    pub fn tracks(&self) -> &[QTTrack] {
        &self.tracks
    }

    pub fn tracks_mut(&mut self) -> &mut [QTTrack] {
        &mut self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.tracks.iter().any(|t| t.path() == path)
    }

    /// Add a track unless its path is already selected.
    pub fn add_track(&mut self, track: QTTrack) {
        if !self.contains(track.path()) {
            self.tracks.push(track);
        }
    }

    pub fn remove_track(&mut self, path: &Path) -> Option<QTTrack> {
        let i = self.tracks.iter().position(|t| t.path() == path)?;
        Some(self.tracks.remove(i))
    }

    /// Replace the selection with a single track.
    pub fn load_single(&mut self, track: QTTrack) {
        self.tracks.clear();
        self.tracks.push(track);
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn mood(&self) -> Option<&str> {
        unanimous_mood(&self.tracks)
    }

    pub fn set_mood(&mut self, mood: Option<String>) {
        for track in &mut self.tracks {
            track.set_mood(mood.clone());
        }
    }

    pub fn energy(&self) -> u8 {
        unanimous_energy(&self.tracks)
    }

    pub fn set_energy(&mut self, energy: u8) {
        for track in &mut self.tracks {
            track.set_energy(energy);
        }
    }

    pub fn note(&self) -> &str {
        unanimous_note(&self.tracks)
    }

    pub fn set_note(&mut self, note: &str) {
        for track in &mut self.tracks {
            track.set_note(note);
        }
    }

    pub fn genres(&self) -> Vec<String> {
        common_genres(&self.tracks)
    }

    /// Remove the genre from every track that has it if any does, otherwise add it to all.
    pub fn toggle_genre(&mut self, genre: &str) {
        if self.tracks.iter().any(|t| t.has_genre(genre)) {
            for track in self.tracks.iter_mut().filter(|t| t.has_genre(genre)) {
                track.toggle_genre(genre);
            }
        } else {
            for track in &mut self.tracks {
                track.toggle_genre(genre);
            }
        }
    }

    pub fn get_custom(&self, tag: usize, value: &str) -> bool {
        all_have_custom(&self.tracks, tag, value)
    }

    /// Same any-has-removes rule as [`QTMultiTrack::toggle_genre`].
    pub fn toggle_custom(&mut self, tag: usize, value: &str) -> Result<()> {
        if self.tracks.iter().any(|t| t.has_custom(tag, value)) {
            for track in &mut self.tracks {
                track.remove_custom(tag, value)?;
            }
        } else {
            for track in &mut self.tracks {
                track.add_custom(tag, value)?;
            }
        }
        Ok(())
    }

    pub fn is_changed(&self) -> bool {
        self.tracks.iter().any(QTTrack::is_changed)
    }

    /// Change-sets of the members with changes, one save each.
    pub fn outputs(&self) -> Vec<TagChanges> {
        self.tracks.iter().map(QTTrack::output).filter(|o| !o.is_empty()).collect()
    }
}
