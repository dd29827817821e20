//! Prelude module for the chart format.
//!
//! This module re-exports all public types and operations of the chart module for convenient
//! access. You can use `use chart_rs::chart::prelude::*;` to import them at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, emit_read_error};

pub use super::{
    CancellationToken, ExecutionMode, ReadError,
    command::{
        header::SectionKind,
        mixin::{Located, LocatedExt, SourceLine},
    },
    config::{
        ComponentList, DuplicatePolicy, InstrumentComponentList, LineEnding,
        OverlappingPhrasePolicy, ReadConfig, SnappedNotesPolicy, SoloNoStarPowerPolicy,
        TempolessAnchorPolicy, UnknownSectionPolicy, UnsupportedModifierPolicy, WriteConfig,
    },
    model::{
        LongTrackObject, Song, TrackObject,
        chord::{
            ChartLane, Chord, ChordModifiers, DrumsChord, DrumsLane, DrumsModifiers, GhlChord,
            GhlLane, GhlModifiers, Lane, Note, StandardChord, StandardLane, StandardModifiers,
        },
        event::Event,
        instrument::{
            AnyInstrumentRef, AnyTrack, Difficulty, Instrument, InstrumentFamily,
            InstrumentIdentity, InstrumentSet,
        },
        metadata::{Metadata, UnidentifiedEntry},
        section::{ReservedHeaderError, Section, SectionSet},
        sync_track::{SyncTrack, Tempo, TimeSignature},
        track::{Phrase, PhraseKind, Track},
    },
    parse::{ParseError, ParsedSection, SectionParser},
    queue::{QueueReader, QueueWriter, TryPull, streamed_queue},
    read_components, read_global_events, read_instruments, read_metadata, read_song,
    read_song_concurrent, read_song_from_str, read_sync_track, replace_components,
    replace_global_events, replace_instruments, replace_metadata, replace_sync_track,
    scan::{ComponentResolver, SectionResolver, SectionTarget, SourceLines, scan_sections},
    session::{DuplicateKind, ReadSession, WriteSession},
    unparse::{SectionReplacement, SectionSerializer, SerializedSection, WriteError},
    write::{Truncate, patch_in_place, patch_sections, write_sections},
    write_song,
};
