/// The quicktag module holds the loaded track list and the active selection. It only orchestrates;
/// diffing lives in the track and multitrack modules.
///
/// The selection holds its own copies of the loaded tracks. Edits happen on those copies, and the
/// loaded list is only refreshed when the backend reports a file as saved.
use crate::changes::TagChanges;
use crate::error::{QuickTagExpectedError, Result};
use crate::file::{QuickTagData, QuickTagFailed, QuickTagFile};
use crate::multitrack::QTMultiTrack;
use crate::settings::{QuickTagSettings, SortOption};
use crate::track::QTTrack;
use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// The current selection has unsaved changes and was kept.
    UnsavedChanges,
}

#[derive(Debug, Clone)]
pub struct QuickTag {
    settings: Arc<QuickTagSettings>,
    tracks: Vec<QTTrack>,
    failed: Vec<QuickTagFailed>,
    selection: QTMultiTrack,
}

impl QuickTag {
    pub fn new(settings: QuickTagSettings) -> QuickTag {
        QuickTag { settings: Arc::new(settings), tracks: vec![], failed: vec![], selection: QTMultiTrack::new() }
    }

    pub fn settings(&self) -> &Arc<QuickTagSettings> {
        &self.settings
    }

    pub fn tracks(&self) -> &[QTTrack] {
        &self.tracks
    }

    pub fn failed(&self) -> &[QuickTagFailed] {
        &self.failed
    }

    pub fn selection(&self) -> &QTMultiTrack {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut QTMultiTrack {
        &mut self.selection
    }

    /// Replace everything with a freshly loaded set of files.
    pub fn load(&mut self, data: QuickTagData) {
        info!("Loaded {} files for quicktag ({} failed)", data.files.len(), data.failed.len());
        for failed in &data.failed {
            warn!("Failed loading {}: {}", failed.path.display(), failed.error);
        }
        self.tracks = data.files.into_iter().map(|f| QTTrack::new(f, Arc::clone(&self.settings))).collect();
        self.failed = data.failed;
        self.selection.clear();
        self.sort();
    }

    /// Order the loaded tracks by the configured sort option.
    pub fn sort(&mut self) {
        let option = self.settings.sort_option;
        self.tracks.sort_by(|a, b| compare_tracks(a.file(), b.file(), option));
        if self.settings.sort_descending {
            self.tracks.reverse();
        }
    }

    fn find(&self, path: &Path) -> Result<&QTTrack> {
        self.tracks
            .iter()
            .find(|t| t.path() == path)
            .ok_or_else(|| QuickTagExpectedError::TrackDoesNotExist { path: path.to_path_buf() }.into())
    }

    /// Select a single track for editing. Refuses when the selection has unsaved changes unless
    /// forced.
    pub fn load_track(&mut self, path: &Path, force: bool) -> Result<LoadOutcome> {
        let track = self.find(path)?.clone();
        if !force && self.selection.is_changed() {
            debug!("Keeping selection with unsaved changes instead of loading {}", path.display());
            return Ok(LoadOutcome::UnsavedChanges);
        }
        self.selection.load_single(track);
        Ok(LoadOutcome::Loaded)
    }

    /// Add or remove a track from the bulk-edit selection.
    pub fn toggle_selection(&mut self, path: &Path) -> Result<()> {
        if self.selection.remove_track(path).is_none() {
            let track = self.find(path)?.clone();
            self.selection.add_track(track);
        }
        Ok(())
    }

    /// Move a single selection by `offset` in the loaded order, stopping at either end. With no
    /// selection the first track is loaded.
    pub fn change_track(&mut self, offset: isize, force: bool) -> Result<LoadOutcome> {
        if self.tracks.is_empty() {
            return Ok(LoadOutcome::Loaded);
        }
        let current = self.selection.tracks().last().and_then(|s| self.tracks.iter().position(|t| t.path() == s.path()));
        let index = match current {
            Some(i) => i.saturating_add_signed(offset).min(self.tracks.len() - 1),
            None => 0,
        };
        let path = self.tracks[index].path().to_path_buf();
        self.load_track(&path, force)
    }

    pub fn outputs(&self) -> Vec<TagChanges> {
        self.selection.outputs()
    }

    /// The backend saved the file: rebuild its track from the new snapshot, in the list and in
    /// the selection.
    pub fn on_saved(&mut self, file: QuickTagFile) {
        info!("Saved {}", file.path.display());
        let track = QTTrack::new(file, Arc::clone(&self.settings));
        match self.tracks.iter_mut().find(|t| t.path() == track.path()) {
            Some(loaded) => *loaded = track.clone(),
            None => warn!("Saved file is not loaded: {}", track.path().display()),
        }
        if let Some(selected) = self.selection.tracks_mut().iter_mut().find(|t| t.path() == track.path()) {
            *selected = track;
        }
    }
}

fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    compare_option(a.map(str::to_lowercase), b.map(str::to_lowercase))
}

// Absent values sort last
fn compare_option<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_tracks(a: &QuickTagFile, b: &QuickTagFile, option: SortOption) -> Ordering {
    match option {
        SortOption::Title => compare_text(Some(&a.title), Some(&b.title)),
        SortOption::Artist => compare_text(a.artists.first().map(String::as_str), b.artists.first().map(String::as_str)),
        SortOption::Bpm => compare_option(a.bpm, b.bpm),
        SortOption::Genre => compare_text(a.genres.first().map(String::as_str), b.genres.first().map(String::as_str)),
        SortOption::Year => compare_option(a.year, b.year),
        SortOption::Key => compare_text(a.key.as_deref(), b.key.as_deref()),
    }
}
