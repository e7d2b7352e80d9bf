pub mod changes;
pub mod common;
pub mod error;
pub mod file;
pub mod frame;
pub mod multitrack;
pub mod quicktag;
pub mod settings;
pub mod track;

#[cfg(test)]
mod testing;

pub use changes::{TagChange, TagChanges};
pub use error::{QuickTagError, QuickTagExpectedError, Result};
pub use file::{QuickTagData, QuickTagFailed, QuickTagFile};
pub use frame::{AudioFileFormat, FrameName, Separators, TagFormat};
pub use multitrack::QTMultiTrack;
pub use quicktag::{LoadOutcome, QuickTag};
pub use settings::{EnergyEncoding, EnergyTag, QuickTagCustom, QuickTagSettings};
pub use track::QTTrack;

#[cfg(test)]
mod settings_test;
