//! Difficulty tracks and their special phrases.

use itertools::Itertools;

use super::{
    LongTrackObject, TrackObject,
    chord::{Chord, Lane},
    event::Event,
};

/// Type code of a special phrase, written as the first value of an `S` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PhraseKind {
    /// Face-off section of the first player.
    Player1FaceOff,
    /// Face-off section of the second player.
    Player2FaceOff,
    /// Notes granting star power when completed.
    StarPowerGain,
    /// Zone where star power can be activated, also known as a drum fill.
    StarPowerActivation,
    /// Single pad drum roll.
    TrillRoll,
    /// Two pad drum roll.
    TremoloRoll,
    /// A type code unknown to this crate, kept as is.
    Other(u8),
}

impl PhraseKind {
    /// Decodes a type code.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Player1FaceOff,
            1 => Self::Player2FaceOff,
            2 => Self::StarPowerGain,
            64 => Self::StarPowerActivation,
            65 => Self::TrillRoll,
            66 => Self::TremoloRoll,
            other => Self::Other(other),
        }
    }

    /// Encodes the type code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Player1FaceOff => 0,
            Self::Player2FaceOff => 1,
            Self::StarPowerGain => 2,
            Self::StarPowerActivation => 64,
            Self::TrillRoll => 65,
            Self::TremoloRoll => 66,
            Self::Other(other) => other,
        }
    }
}

/// A special phrase spanning a range of a track, written as `S type length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phrase {
    /// Position in ticks.
    pub position: u32,
    /// Duration in ticks.
    pub length: u32,
    /// Type of the phrase.
    pub kind: PhraseKind,
}

impl Phrase {
    /// Creates a new phrase.
    #[must_use]
    pub const fn new(position: u32, length: u32, kind: PhraseKind) -> Self {
        Self {
            position,
            length,
            kind,
        }
    }
}

impl TrackObject for Phrase {
    fn position(&self) -> u32 {
        self.position
    }
}

impl LongTrackObject for Phrase {
    fn length(&self) -> u32 {
        self.length
    }

    fn set_length(&mut self, length: u32) {
        self.length = length;
    }
}

/// One difficulty of one instrument.
///
/// Chords, local events and special phrases are each kept sorted by position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track<L: Lane> {
    /// Chords in position order.
    pub chords: Vec<Chord<L>>,
    /// Events scoped to this track, in position order.
    pub local_events: Vec<Event>,
    /// Special phrases in position order.
    pub special_phrases: Vec<Phrase>,
}

impl<L: Lane> Default for Track<L> {
    fn default() -> Self {
        Self {
            chords: Vec::new(),
            local_events: Vec::new(),
            special_phrases: Vec::new(),
        }
    }
}

impl<L: Lane> Track<L> {
    /// Checks whether the track holds no chord, no local event and no special phrase.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty() && self.local_events.is_empty() && self.special_phrases.is_empty()
    }

    /// Returns the chord at the position, if any.
    #[must_use]
    pub fn chord_at(&self, position: u32) -> Option<&Chord<L>> {
        self.chords
            .binary_search_by_key(&position, |chord| chord.position)
            .ok()
            .and_then(|index| self.chords.get(index))
    }

    /// Checks whether any local event opens or closes a solo.
    #[must_use]
    pub fn has_solo_events(&self) -> bool {
        self.local_events
            .iter()
            .any(|event| event.is_solo_start() || event.is_solo_end())
    }

    /// Builds star power phrases out of `solo` and `soloend` local event pairs.
    ///
    /// A `solo` without a following `soloend` produces nothing.
    #[must_use]
    pub fn solo_star_power(&self) -> Vec<Phrase> {
        let mut phrases = vec![];
        let mut open = None;
        for event in self.local_events.iter().sorted_by_key(|event| event.position) {
            if event.is_solo_start() {
                open = Some(event.position);
            } else if event.is_solo_end()
                && let Some(start) = open.take()
            {
                phrases.push(Phrase::new(
                    start,
                    event.position - start,
                    PhraseKind::StarPowerGain,
                ));
            }
        }
        phrases
    }

    /// Replaces solo events with star power phrases when the track has no special phrase.
    ///
    /// Returns whether a conversion happened.
    pub fn convert_solos_to_star_power(&mut self) -> bool {
        if !self.special_phrases.is_empty() || !self.has_solo_events() {
            return false;
        }
        self.special_phrases = self.solo_star_power();
        self.local_events
            .retain(|event| !event.is_solo_start() && !event.is_solo_end());
        true
    }
}
