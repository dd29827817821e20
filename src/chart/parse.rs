//! Section parsers turning body lines into typed results.
//!
//! The scanner feeds every body line of a section to a [`SectionParser`] in file order, then
//! calls [`SectionParser::finish`] once the section ended. [`new_parser`] picks the parser of a
//! [`SectionKind`].

pub mod global_events;
pub mod metadata;
pub mod sync_track;
pub mod track;
pub mod unknown;

use thiserror::Error;

use super::{
    command::header::SectionKind,
    model::{
        chord::{DrumsLane, GhlLane, StandardLane},
        event::Event,
        instrument::{AnyTrack, Difficulty, InstrumentFamily, InstrumentIdentity},
        metadata::Metadata,
        section::Section,
        sync_track::SyncTrack,
    },
    session::{DuplicateKind, ReadSession},
};

/// An error raised by a section parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The line does not follow the grammar of the section.
    #[error("expected an entry of the form {expected}, found `{line}`")]
    InvalidEntry {
        /// Description of the expected grammar.
        expected: &'static str,
        /// The offending line.
        line: String,
    },
    /// A value of the entry is missing or malformed.
    #[error("expected {what}, found `{found}`")]
    ExpectedValue {
        /// What the value stands for.
        what: &'static str,
        /// The offending text, empty when missing.
        found: String,
    },
    /// An object was found twice under [`crate::chart::config::DuplicatePolicy::Throw`].
    #[error("duplicate {kind} at position {position}")]
    Duplicate {
        /// Kind of the object.
        kind: DuplicateKind,
        /// Position of the object.
        position: u32,
    },
    /// A metadata key was found twice under [`crate::chart::config::DuplicatePolicy::Throw`].
    #[error("duplicate metadata key `{key}`")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
    /// A special phrase overlaps the one before it.
    #[error("special phrase at position {position} overlaps the phrase before it")]
    OverlappingPhrases {
        /// Position of the later phrase.
        position: u32,
    },
    /// A note lies within the snapping distance of a chord.
    #[error("note at position {position} is snapped to the chord at position {origin}")]
    SnappedNote {
        /// Position of the chord.
        origin: u32,
        /// Position of the note.
        position: u32,
    },
    /// An anchor never received a tempo value.
    #[error("anchor at position {position} has no tempo value")]
    TempolessAnchor {
        /// Position of the anchor.
        position: u32,
    },
}

/// Type alias of `core::result::Result<T, ParseError>`
pub type Result<T> = core::result::Result<T, ParseError>;

/// The typed result of one section.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedSection {
    /// Result of `[Song]`.
    Metadata(Metadata),
    /// Result of `[SyncTrack]`.
    SyncTrack(SyncTrack),
    /// Result of `[Events]`, in position order.
    GlobalEvents(Vec<Event>),
    /// Result of a difficulty track.
    Track {
        /// Instrument owning the track.
        instrument: InstrumentIdentity,
        /// Difficulty of the track.
        difficulty: Difficulty,
        /// The track.
        track: AnyTrack,
    },
    /// A section not modeled by this crate.
    Unknown(Section),
}

/// Consumes the body lines of one section.
pub trait SectionParser: Send {
    /// Handles one trimmed, non-empty body line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the line cannot be decoded or a policy rejects it.
    fn handle_line(&mut self, line: &str) -> Result<()>;

    /// Applies the end-of-section policies and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if a policy applied on completion rejects the result.
    fn finish(self: Box<Self>) -> Result<ParsedSection>;
}

/// Creates the parser of a section kind.
#[must_use]
pub fn new_parser(kind: SectionKind, session: ReadSession) -> Box<dyn SectionParser> {
    match kind {
        SectionKind::Metadata => Box::new(metadata::MetadataParser::new(session)),
        SectionKind::SyncTrack => Box::new(sync_track::SyncTrackParser::new(session)),
        SectionKind::GlobalEvents => Box::new(global_events::GlobalEventsParser::default()),
        SectionKind::Track {
            instrument,
            difficulty,
        } => match instrument.family() {
            InstrumentFamily::Standard => Box::new(track::TrackParser::<StandardLane>::new(
                session, instrument, difficulty,
            )),
            InstrumentFamily::Ghl => Box::new(track::TrackParser::<GhlLane>::new(
                session, instrument, difficulty,
            )),
            InstrumentFamily::Drums => Box::new(track::TrackParser::<DrumsLane>::new(
                session, instrument, difficulty,
            )),
        },
    }
}

/// Runs a parser over lines and finishes it, for sections read outside of a scan.
///
/// # Errors
///
/// Returns the first [`ParseError`] raised.
pub fn parse_lines<'a>(
    mut parser: Box<dyn SectionParser>,
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<ParsedSection> {
    for line in lines {
        let line = line.trim();
        if !line.is_empty() {
            parser.handle_line(line)?;
        }
    }
    parser.finish()
}
