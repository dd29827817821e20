//! Typed results of the section parsers and the song aggregate holding them.
//!
//! Every object placed on a track implements [`TrackObject`]. Objects with a duration also
//! implement [`LongTrackObject`].

pub mod chord;
pub mod event;
pub mod instrument;
pub mod metadata;
pub mod section;
pub mod sync_track;
pub mod track;

use self::{
    event::Event, instrument::InstrumentSet, metadata::Metadata, section::SectionSet,
    sync_track::SyncTrack,
};

/// An object anchored to a position in ticks.
pub trait TrackObject {
    /// Returns the position in ticks.
    fn position(&self) -> u32;
}

/// A track object spanning a duration.
pub trait LongTrackObject: TrackObject {
    /// Returns the duration in ticks.
    fn length(&self) -> u32;

    /// Sets the duration in ticks.
    fn set_length(&mut self, length: u32);

    /// Returns the position where the object ends.
    fn end_position(&self) -> u32 {
        self.position().saturating_add(self.length())
    }
}

/// Everything read from a `.chart` file.
///
/// Sections absent from the source, or not selected for reading, stay `None` or empty.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Song {
    /// Contents of `[Song]`.
    pub metadata: Option<Metadata>,
    /// Contents of `[SyncTrack]`.
    pub sync_track: Option<SyncTrack>,
    /// Contents of `[Events]`, in position order.
    pub global_events: Option<Vec<Event>>,
    /// Difficulty tracks of every instrument.
    pub instruments: InstrumentSet,
    /// Sections not modeled by this crate, kept verbatim.
    pub unknown_sections: SectionSet,
}

impl Song {
    /// Returns the resolution declared by the metadata, if any.
    #[must_use]
    pub fn resolution(&self) -> Option<u16> {
        self.metadata.as_ref().and_then(|metadata| metadata.resolution)
    }
}
