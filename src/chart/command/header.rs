//! Section headers and the section kinds they select.
//!
//! Header lookup is a plain `match` over the exact header text, so no table has to be built at
//! runtime.

use crate::chart::model::instrument::{Difficulty, InstrumentIdentity};

/// Header of the metadata section.
pub const METADATA_HEADER: &str = "[Song]";
/// Header of the sync track section.
pub const SYNC_TRACK_HEADER: &str = "[SyncTrack]";
/// Header of the global events section.
pub const GLOBAL_EVENTS_HEADER: &str = "[Events]";

/// A kind of section modeled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionKind {
    /// `[Song]`, the metadata.
    Metadata,
    /// `[SyncTrack]`, the tempo markers, anchors and time signatures.
    SyncTrack,
    /// `[Events]`, the global events.
    GlobalEvents,
    /// A difficulty track of an instrument, such as `[ExpertSingle]`.
    Track {
        /// Instrument owning the track.
        instrument: InstrumentIdentity,
        /// Difficulty of the track.
        difficulty: Difficulty,
    },
}

impl SectionKind {
    /// Looks up the section kind of a trimmed header line, including its brackets.
    ///
    /// Returns `None` for headers not modeled by this crate.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        match header {
            METADATA_HEADER => return Some(Self::Metadata),
            SYNC_TRACK_HEADER => return Some(Self::SyncTrack),
            GLOBAL_EVENTS_HEADER => return Some(Self::GlobalEvents),
            _ => {}
        }
        let name = header.strip_prefix('[')?.strip_suffix(']')?;
        Difficulty::ALL.into_iter().find_map(|difficulty| {
            let part = name.strip_prefix(difficulty.name())?;
            let instrument = InstrumentIdentity::from_part_name(part)?;
            Some(Self::Track {
                instrument,
                difficulty,
            })
        })
    }

    /// Returns the header line of the section kind, including its brackets.
    #[must_use]
    pub fn header(self) -> String {
        match self {
            Self::Metadata => METADATA_HEADER.to_owned(),
            Self::SyncTrack => SYNC_TRACK_HEADER.to_owned(),
            Self::GlobalEvents => GLOBAL_EVENTS_HEADER.to_owned(),
            Self::Track {
                instrument,
                difficulty,
            } => track_header(instrument, difficulty),
        }
    }
}

/// Returns the header of a difficulty track, such as `[HardDoubleBass]`.
#[must_use]
pub fn track_header(instrument: InstrumentIdentity, difficulty: Difficulty) -> String {
    format!("[{}{}]", difficulty.name(), instrument.part_name())
}

/// Checks whether a header is owned by a section kind modeled by this crate.
#[must_use]
pub fn is_reserved(header: &str) -> bool {
    SectionKind::from_header(header).is_some()
}
