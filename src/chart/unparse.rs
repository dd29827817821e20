//! Serializers rendering typed results back into section lines.
//!
//! Every section kind has a [`SectionSerializer`] mirroring its parser. Serializers only produce
//! body lines, the section writer wraps them with the header and the body delimiters.

pub mod events;
pub mod metadata;
pub mod sync_track;
pub mod track;
pub mod unknown;

use std::io;

use thiserror::Error;

use super::{
    command::header::{SectionKind, track_header},
    config::{ComponentList, InstrumentComponentList},
    model::{
        Song,
        chord::ChartLane,
        instrument::{AnyInstrumentRef, Difficulty, InstrumentIdentity, InstrumentSet},
        section::ReservedHeaderError,
        track::Track,
    },
    session::{DuplicateKind, WriteSession},
};

/// An error raised while serializing or writing sections.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteError {
    /// The destination or the existing content failed.
    #[error("failed to write the chart: {0}")]
    Io(#[from] io::Error),
    /// A chord carries modifiers the format cannot encode, under
    /// [`crate::chart::config::UnsupportedModifierPolicy::Throw`].
    #[error("chord at position {position} carries modifiers without native encoding")]
    UnsupportedModifier {
        /// Position of the chord.
        position: u32,
    },
    /// An object shares its position with another one under
    /// [`crate::chart::config::DuplicatePolicy::Throw`].
    #[error("duplicate {kind} at position {position}")]
    Duplicate {
        /// Kind of the object.
        kind: DuplicateKind,
        /// Position of the object.
        position: u32,
    },
    /// A special phrase overlaps the one before it.
    #[error("special phrase at position {position} overlaps the phrase before it")]
    OverlappingPhrases {
        /// Position of the later phrase.
        position: u32,
    },
    /// A raw section was given a header owned by a built-in section.
    #[error(transparent)]
    ReservedHeader(#[from] ReservedHeaderError),
}

/// Type alias of `core::result::Result<T, WriteError>`
pub type Result<T> = core::result::Result<T, WriteError>;

/// A header along with the body lines rendered for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerializedSection {
    /// Header line, including its brackets.
    pub header: String,
    /// Body lines, without the delimiters and line terminators.
    pub lines: Vec<String>,
}

/// Renders one typed result into the body lines of its section.
pub trait SectionSerializer {
    /// Returns the header of the section, including its brackets.
    fn header(&self) -> String;

    /// Renders the body lines.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] if a write policy rejects the content.
    fn serialize(&self, session: &WriteSession) -> Result<Vec<String>>;

    /// Renders the whole section.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] if a write policy rejects the content.
    fn to_section(&self, session: &WriteSession) -> Result<SerializedSection> {
        Ok(SerializedSection {
            header: self.header(),
            lines: self.serialize(session)?,
        })
    }
}

/// What the writer does with the section of a header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionReplacement {
    /// Write the section, replacing an existing one of the same header.
    Replace(SerializedSection),
    /// Delete an existing section of the header. Never written to a blank output.
    Remove(String),
}

impl SectionReplacement {
    /// Returns the header the replacement applies to.
    #[must_use]
    pub fn header(&self) -> &str {
        match self {
            Self::Replace(section) => &section.header,
            Self::Remove(header) => header,
        }
    }

    fn of(header: String, section: Option<SerializedSection>) -> Self {
        section.map_or(Self::Remove(header), Self::Replace)
    }
}

/// Serializes a difficulty track of the set. Returns `None` for empty tracks.
///
/// # Errors
///
/// Returns [`WriteError`] if a write policy rejects the track.
pub fn serialize_track(
    instruments: &InstrumentSet,
    instrument: InstrumentIdentity,
    difficulty: Difficulty,
    session: &WriteSession,
) -> Result<Option<SerializedSection>> {
    fn render<L: ChartLane>(
        instrument: InstrumentIdentity,
        difficulty: Difficulty,
        track: &Track<L>,
        session: &WriteSession,
    ) -> Result<Option<SerializedSection>> {
        if track.is_empty() {
            return Ok(None);
        }
        track::TrackSerializer::new(instrument, difficulty, track)
            .to_section(session)
            .map(Some)
    }

    match instruments.get(instrument) {
        AnyInstrumentRef::Standard(set) => {
            render(instrument, difficulty, set.track(difficulty), session)
        }
        AnyInstrumentRef::Ghl(set) => render(instrument, difficulty, set.track(difficulty), session),
        AnyInstrumentRef::Drums(set) => {
            render(instrument, difficulty, set.track(difficulty), session)
        }
    }
}

/// Builds the replacements writing the selected tracks of the set, removing the empty ones.
///
/// # Errors
///
/// Returns [`WriteError`] if a write policy rejects a track.
pub fn instrument_replacements(
    instruments: &InstrumentSet,
    selected: &InstrumentComponentList,
    session: &WriteSession,
) -> Result<Vec<SectionReplacement>> {
    let mut replacements = vec![];
    for instrument in InstrumentIdentity::ALL {
        for difficulty in Difficulty::ALL {
            if !selected.contains(instrument, difficulty) {
                continue;
            }
            let section = serialize_track(instruments, instrument, difficulty, session)?;
            replacements.push(SectionReplacement::of(
                track_header(instrument, difficulty),
                section,
            ));
        }
    }
    Ok(replacements)
}

/// Builds the replacements writing the selected components of the song, in the order sections
/// are written: metadata, sync track, global events, tracks, then stored unknown sections.
///
/// Selected components missing from the song, and empty tracks, become removals.
///
/// # Errors
///
/// Returns [`WriteError`] if a write policy rejects a component.
pub fn song_replacements(
    song: &Song,
    components: &ComponentList,
    session: &WriteSession,
) -> Result<Vec<SectionReplacement>> {
    let mut replacements = vec![];
    if components.metadata {
        let section = song
            .metadata
            .as_ref()
            .map(|metadata| metadata::MetadataSerializer::new(metadata).to_section(session))
            .transpose()?;
        replacements.push(SectionReplacement::of(SectionKind::Metadata.header(), section));
    }
    if components.sync_track {
        let section = song
            .sync_track
            .as_ref()
            .map(|sync_track| sync_track::SyncTrackSerializer::new(sync_track).to_section(session))
            .transpose()?;
        replacements.push(SectionReplacement::of(SectionKind::SyncTrack.header(), section));
    }
    if components.global_events {
        let section = song
            .global_events
            .as_deref()
            .map(|events| events::GlobalEventsSerializer::new(events).to_section(session))
            .transpose()?;
        replacements.push(SectionReplacement::of(
            SectionKind::GlobalEvents.header(),
            section,
        ));
    }
    replacements.extend(instrument_replacements(
        &song.instruments,
        &components.instruments,
        session,
    )?);
    if components.unknown_sections {
        for section in &song.unknown_sections {
            let serializer = unknown::UnknownSectionSerializer::new(section)?;
            replacements.push(SectionReplacement::Replace(serializer.to_section(session)?));
        }
    }
    Ok(replacements)
}
