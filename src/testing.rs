use crate::file::QuickTagFile;
use crate::frame::AudioFileFormat;
use crate::settings::QuickTagSettings;
use crate::track::QTTrack;
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")))
            .with_test_writer()
            .try_init();
    });
}

// Stock settings: mood on TMOO/MOOD/iTunes:MOOD, energy as rating, three custom groups on the
// comment field.
pub fn settings() -> Arc<QuickTagSettings> {
    init();
    Arc::new(QuickTagSettings::default())
}

pub fn file(path: &str, format: AudioFileFormat, tags: &[(&str, &[&str])]) -> QuickTagFile {
    let mut file = QuickTagFile::new(path, format);
    file.title = path.rsplit('/').next().unwrap_or(path).to_string();
    file.artists = vec!["Artist".to_string()];
    for (field, values) in tags {
        file.tags.insert(field.to_string(), values.iter().map(|v| v.to_string()).collect());
    }
    file
}

pub fn mp3(path: &str, tags: &[(&str, &[&str])]) -> QuickTagFile {
    file(path, AudioFileFormat::Mp3, tags)
}

pub fn track(settings: &Arc<QuickTagSettings>, file: QuickTagFile) -> QTTrack {
    QTTrack::new(file, Arc::clone(settings))
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
