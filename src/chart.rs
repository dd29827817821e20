//! The reader, writer and in-place patcher of `.chart` files.
//!
//! Reading goes through three layers:
//!
//! - [`scan`] walks the source lines once, recognizes sections and streams every selected body
//!   into its own [`queue`].
//! - [`parse`] consumes the queued lines of one section and produces a typed result, asking the
//!   [`session`] how to resolve duplicates, overlaps and other policy concerns.
//! - The read operations of this module gather the typed results into a [`Song`].
//!
//! Writing mirrors it: [`unparse`] renders typed results into lines and [`write`] emits them into a
//! blank output, or patches an existing one by replacing only the rewritten sections.
//!
//! Both directions are configured by plain values of [`config`], there is no global default.

pub mod command;
pub mod config;
pub mod model;
pub mod parse;
pub mod prelude;
pub mod queue;
pub mod scan;
pub mod session;
pub mod unparse;
pub mod write;

use std::io::{self, BufRead, Read, Seek, Write};

use thiserror::Error;
use tracing::warn;

pub use self::scan::{CancellationToken, ExecutionMode};

use self::{
    command::mixin::SourceLine,
    config::{ComponentList, InstrumentComponentList, ReadConfig, WriteConfig},
    model::{
        Song, event::Event, instrument::InstrumentSet, metadata::Metadata, sync_track::SyncTrack,
    },
    parse::{ParseError, ParsedSection},
    scan::{ComponentResolver, scan_sections},
    session::{ReadSession, WriteSession},
    unparse::{
        SectionReplacement, SectionSerializer, WriteError, events::GlobalEventsSerializer,
        instrument_replacements, metadata::MetadataSerializer, song_replacements,
        sync_track::SyncTrackSerializer,
    },
    write::{Truncate, patch_in_place, write_sections},
};

/// An error aborting a read operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadError {
    /// The source failed.
    #[error("failed to read the chart: {0}")]
    Io(#[from] io::Error),
    /// A header is not modeled by this crate under
    /// [`config::UnknownSectionPolicy::Throw`].
    #[error("unknown section {header}")]
    UnknownSection {
        /// The header line.
        header: SourceLine,
    },
    /// The source ended inside a section.
    #[error("section {header} ended before its closing line")]
    EarlySectionEnd {
        /// The header line of the section.
        header: SourceLine,
    },
    /// A section parser rejected the content of its section.
    #[error("in section {header}{}: {error}", offending_line(.line))]
    Section {
        /// The header line of the section.
        header: SourceLine,
        /// The offending line, absent when the error was raised once the section ended.
        line: Option<SourceLine>,
        /// The parser error.
        #[source]
        error: ParseError,
    },
    /// The operation observed its cancellation token.
    #[error("the read was cancelled")]
    Cancelled,
}

fn offending_line(line: &Option<SourceLine>) -> String {
    line.as_ref()
        .map_or_else(String::new, |line| format!(", {line}"))
}

/// Gathers section results into a song. A section found twice in the source overwrites the
/// result of the previous one.
fn assemble(sections: Vec<ParsedSection>) -> Song {
    let mut song = Song::default();
    for section in sections {
        match section {
            ParsedSection::Metadata(metadata) => song.metadata = Some(metadata),
            ParsedSection::SyncTrack(sync_track) => song.sync_track = Some(sync_track),
            ParsedSection::GlobalEvents(events) => song.global_events = Some(events),
            ParsedSection::Track {
                instrument,
                difficulty,
                track,
            } => {
                if song
                    .instruments
                    .set_track(instrument, difficulty, track)
                    .is_err()
                {
                    warn!(?instrument, ?difficulty, "track does not match its instrument");
                }
            }
            ParsedSection::Unknown(section) => {
                if let Err(err) = song.unknown_sections.insert(section) {
                    warn!(%err, "dropping raw section");
                }
            }
        }
    }
    song
}

/// Reads the selected components of a song.
///
/// Components not selected are skipped without being buffered. Unknown sections are only
/// considered when [`ComponentList::unknown_sections`] is selected, in which case the unknown
/// section policy decides whether they fail the read or are stored.
///
/// # Errors
///
/// Returns the first [`ReadError`] in file order, or [`ReadError::Cancelled`] once `cancel` was
/// triggered.
pub fn read_components<R: BufRead>(
    reader: R,
    components: &ComponentList,
    config: &ReadConfig,
    mode: ExecutionMode,
    cancel: &CancellationToken,
) -> Result<Song, ReadError> {
    let resolver = ComponentResolver::new(components, ReadSession::new(*config));
    scan_sections(reader, &resolver, mode, cancel).map(assemble)
}

/// Reads a whole song, parsing sections one after another.
///
/// # Errors
///
/// Returns the first [`ReadError`] in file order.
pub fn read_song<R: BufRead>(reader: R, config: &ReadConfig) -> Result<Song, ReadError> {
    read_components(
        reader,
        &ComponentList::full(),
        config,
        ExecutionMode::Blocking,
        &CancellationToken::new(),
    )
}

/// Reads a whole song, parsing every section on its own thread while the source is scanned.
///
/// # Errors
///
/// Returns the first [`ReadError`] in file order, or [`ReadError::Cancelled`] once `cancel` was
/// triggered.
pub fn read_song_concurrent<R: BufRead>(
    reader: R,
    config: &ReadConfig,
    cancel: &CancellationToken,
) -> Result<Song, ReadError> {
    read_components(
        reader,
        &ComponentList::full(),
        config,
        ExecutionMode::Concurrent,
        cancel,
    )
}

/// Reads a whole song from a string.
///
/// # Errors
///
/// Returns the first [`ReadError`] in file order.
pub fn read_song_from_str(source: &str, config: &ReadConfig) -> Result<Song, ReadError> {
    read_song(source.as_bytes(), config)
}

fn read_only<R: BufRead>(
    reader: R,
    components: &ComponentList,
    config: &ReadConfig,
) -> Result<Song, ReadError> {
    read_components(
        reader,
        components,
        config,
        ExecutionMode::Blocking,
        &CancellationToken::new(),
    )
}

/// Reads the metadata only. Returns `None` when the source has no `[Song]` section.
///
/// # Errors
///
/// Returns [`ReadError`] if the metadata section cannot be read.
pub fn read_metadata<R: BufRead>(
    reader: R,
    config: &ReadConfig,
) -> Result<Option<Metadata>, ReadError> {
    let components = ComponentList {
        metadata: true,
        ..ComponentList::default()
    };
    Ok(read_only(reader, &components, config)?.metadata)
}

/// Reads the sync track only. Returns `None` when the source has no `[SyncTrack]` section.
///
/// # Errors
///
/// Returns [`ReadError`] if the sync track section cannot be read.
pub fn read_sync_track<R: BufRead>(
    reader: R,
    config: &ReadConfig,
) -> Result<Option<SyncTrack>, ReadError> {
    Ok(read_only(reader, &ComponentList::sync_track(), config)?.sync_track)
}

/// Reads the global events only. Returns `None` when the source has no `[Events]` section.
///
/// # Errors
///
/// Returns [`ReadError`] if the events section cannot be read.
pub fn read_global_events<R: BufRead>(
    reader: R,
    config: &ReadConfig,
) -> Result<Option<Vec<Event>>, ReadError> {
    let components = ComponentList {
        global_events: true,
        ..ComponentList::default()
    };
    Ok(read_only(reader, &components, config)?.global_events)
}

/// Reads the selected difficulty tracks only.
///
/// # Errors
///
/// Returns [`ReadError`] if a selected track cannot be read.
pub fn read_instruments<R: BufRead>(
    reader: R,
    instruments: &InstrumentComponentList,
    config: &ReadConfig,
) -> Result<InstrumentSet, ReadError> {
    let components = ComponentList::instruments(instruments.clone());
    Ok(read_only(reader, &components, config)?.instruments)
}

/// Writes a whole song to a blank destination.
///
/// Sections are written in this order: metadata, sync track, global events, difficulty tracks
/// and stored unknown sections. Absent components and empty tracks are not written.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`WriteError`] if a write policy rejects the song or the destination fails.
pub fn write_song<W: Write>(dest: W, song: &Song, config: &WriteConfig) -> Result<u64, WriteError> {
    let session = WriteSession::new(*config, song.resolution());
    let replacements = song_replacements(song, &ComponentList::full(), &session)?;
    Ok(write_sections(dest, &replacements, config.line_ending)?)
}

/// Rewrites the selected components of a song in an existing destination, leaving every other
/// section untouched.
///
/// Selected components absent from the song, and empty tracks, are removed from the destination.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`WriteError`] if a write policy rejects the song or the destination fails.
pub fn replace_components<D: Read + Write + Seek + Truncate>(
    dest: &mut D,
    song: &Song,
    components: &ComponentList,
    config: &WriteConfig,
) -> Result<u64, WriteError> {
    let session = WriteSession::new(*config, song.resolution());
    let replacements = song_replacements(song, components, &session)?;
    Ok(patch_in_place(dest, &replacements, config.line_ending)?)
}

fn replace_section<D: Read + Write + Seek + Truncate>(
    dest: &mut D,
    serializer: &dyn SectionSerializer,
    config: &WriteConfig,
) -> Result<u64, WriteError> {
    let session = WriteSession::new(*config, None);
    let section = serializer.to_section(&session)?;
    Ok(patch_in_place(
        dest,
        &[SectionReplacement::Replace(section)],
        config.line_ending,
    )?)
}

/// Rewrites the `[Song]` section of an existing destination.
///
/// # Errors
///
/// Returns [`WriteError`] if the destination fails.
pub fn replace_metadata<D: Read + Write + Seek + Truncate>(
    dest: &mut D,
    metadata: &Metadata,
    config: &WriteConfig,
) -> Result<u64, WriteError> {
    replace_section(dest, &MetadataSerializer::new(metadata), config)
}

/// Rewrites the `[SyncTrack]` section of an existing destination.
///
/// # Errors
///
/// Returns [`WriteError`] if a write policy rejects the sync track or the destination fails.
pub fn replace_sync_track<D: Read + Write + Seek + Truncate>(
    dest: &mut D,
    sync_track: &SyncTrack,
    config: &WriteConfig,
) -> Result<u64, WriteError> {
    replace_section(dest, &SyncTrackSerializer::new(sync_track), config)
}

/// Rewrites the `[Events]` section of an existing destination.
///
/// # Errors
///
/// Returns [`WriteError`] if the destination fails.
pub fn replace_global_events<D: Read + Write + Seek + Truncate>(
    dest: &mut D,
    events: &[Event],
    config: &WriteConfig,
) -> Result<u64, WriteError> {
    replace_section(dest, &GlobalEventsSerializer::new(events), config)
}

/// Rewrites the selected difficulty tracks of an existing destination. Selected tracks that are
/// empty in `instruments` are removed.
///
/// `resolution` is the resolution of the song, used for the natural HOPO threshold.
///
/// # Errors
///
/// Returns [`WriteError`] if a write policy rejects a track or the destination fails.
pub fn replace_instruments<D: Read + Write + Seek + Truncate>(
    dest: &mut D,
    instruments: &InstrumentSet,
    selected: &InstrumentComponentList,
    resolution: Option<u16>,
    config: &WriteConfig,
) -> Result<u64, WriteError> {
    let session = WriteSession::new(*config, resolution);
    let replacements = instrument_replacements(instruments, selected, &session)?;
    Ok(patch_in_place(dest, &replacements, config.line_ending)?)
}
