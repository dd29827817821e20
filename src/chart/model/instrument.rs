//! Instruments, difficulties and the set of every instrument of a song.

use super::{
    chord::{DrumsLane, GhlLane, Lane, StandardLane},
    track::Track,
};

/// Difficulty of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Every difficulty, from the easiest.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// Returns the name used as the prefix of track headers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }
}

/// The lane family an instrument plays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstrumentFamily {
    /// Five frets and an open note.
    Standard,
    /// Six frets and an open note.
    Ghl,
    /// Pads, cymbals and kicks.
    Drums,
}

/// An instrument a `.chart` file can hold tracks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstrumentIdentity {
    /// Drums.
    Drums,
    /// Six-fret guitar.
    GhlGuitar,
    /// Six-fret bass.
    GhlBass,
    /// Lead guitar.
    LeadGuitar,
    /// Rhythm guitar.
    RhythmGuitar,
    /// Co-op guitar.
    CoopGuitar,
    /// Bass.
    Bass,
    /// Keys.
    Keys,
}

impl InstrumentIdentity {
    /// Every instrument, in the order the song writer emits them.
    pub const ALL: [Self; 8] = [
        Self::LeadGuitar,
        Self::CoopGuitar,
        Self::RhythmGuitar,
        Self::Bass,
        Self::Keys,
        Self::Drums,
        Self::GhlGuitar,
        Self::GhlBass,
    ];

    /// Returns the part name used as the suffix of track headers.
    #[must_use]
    pub const fn part_name(self) -> &'static str {
        match self {
            Self::Drums => "Drums",
            Self::GhlGuitar => "GHLGuitar",
            Self::GhlBass => "GHLBass",
            Self::LeadGuitar => "Single",
            Self::RhythmGuitar => "DoubleRhythm",
            Self::CoopGuitar => "DoubleGuitar",
            Self::Bass => "DoubleBass",
            Self::Keys => "Keyboard",
        }
    }

    /// Looks up the instrument of a part name.
    #[must_use]
    pub fn from_part_name(part: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|instrument| instrument.part_name() == part)
    }

    /// Returns the lane family the instrument plays with.
    #[must_use]
    pub const fn family(self) -> InstrumentFamily {
        match self {
            Self::Drums => InstrumentFamily::Drums,
            Self::GhlGuitar | Self::GhlBass => InstrumentFamily::Ghl,
            _ => InstrumentFamily::Standard,
        }
    }
}

/// Up to four tracks of one instrument, one per difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instrument<L: Lane> {
    easy: Track<L>,
    medium: Track<L>,
    hard: Track<L>,
    expert: Track<L>,
}

impl<L: Lane> Default for Instrument<L> {
    fn default() -> Self {
        Self {
            easy: Track::default(),
            medium: Track::default(),
            hard: Track::default(),
            expert: Track::default(),
        }
    }
}

impl<L: Lane> Instrument<L> {
    /// Returns the track of the difficulty, empty if absent.
    #[must_use]
    pub const fn track(&self, difficulty: Difficulty) -> &Track<L> {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
            Difficulty::Expert => &self.expert,
        }
    }

    /// Returns the mutable track of the difficulty.
    pub const fn track_mut(&mut self, difficulty: Difficulty) -> &mut Track<L> {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
            Difficulty::Expert => &mut self.expert,
        }
    }

    /// Replaces the track of the difficulty, returning the previous one.
    pub fn set_track(&mut self, difficulty: Difficulty, track: Track<L>) -> Track<L> {
        std::mem::replace(self.track_mut(difficulty), track)
    }

    /// Iterates over the non-empty tracks, from the easiest.
    pub fn existing_tracks(&self) -> impl Iterator<Item = (Difficulty, &Track<L>)> {
        Difficulty::ALL
            .into_iter()
            .map(|difficulty| (difficulty, self.track(difficulty)))
            .filter(|(_, track)| !track.is_empty())
    }

    /// Checks whether every track is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Difficulty::ALL
            .into_iter()
            .all(|difficulty| self.track(difficulty).is_empty())
    }
}

/// A track of any lane family.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum AnyTrack {
    Standard(Track<StandardLane>),
    Ghl(Track<GhlLane>),
    Drums(Track<DrumsLane>),
}

impl AnyTrack {
    /// Checks whether the track is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Standard(track) => track.is_empty(),
            Self::Ghl(track) => track.is_empty(),
            Self::Drums(track) => track.is_empty(),
        }
    }
}

impl From<Track<StandardLane>> for AnyTrack {
    fn from(track: Track<StandardLane>) -> Self {
        Self::Standard(track)
    }
}

impl From<Track<GhlLane>> for AnyTrack {
    fn from(track: Track<GhlLane>) -> Self {
        Self::Ghl(track)
    }
}

impl From<Track<DrumsLane>> for AnyTrack {
    fn from(track: Track<DrumsLane>) -> Self {
        Self::Drums(track)
    }
}

/// A borrowed instrument of any lane family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum AnyInstrumentRef<'a> {
    Standard(&'a Instrument<StandardLane>),
    Ghl(&'a Instrument<GhlLane>),
    Drums(&'a Instrument<DrumsLane>),
}

impl AnyInstrumentRef<'_> {
    /// Checks whether every track is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Standard(instrument) => instrument.is_empty(),
            Self::Ghl(instrument) => instrument.is_empty(),
            Self::Drums(instrument) => instrument.is_empty(),
        }
    }
}

/// The instruments of a song.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct InstrumentSet {
    pub drums: Instrument<DrumsLane>,
    pub ghl_guitar: Instrument<GhlLane>,
    pub ghl_bass: Instrument<GhlLane>,
    pub lead_guitar: Instrument<StandardLane>,
    pub rhythm_guitar: Instrument<StandardLane>,
    pub coop_guitar: Instrument<StandardLane>,
    pub bass: Instrument<StandardLane>,
    pub keys: Instrument<StandardLane>,
}

impl InstrumentSet {
    /// Returns the instrument of the identity.
    #[must_use]
    pub fn get(&self, identity: InstrumentIdentity) -> AnyInstrumentRef<'_> {
        match identity {
            InstrumentIdentity::Drums => AnyInstrumentRef::Drums(&self.drums),
            InstrumentIdentity::GhlGuitar => AnyInstrumentRef::Ghl(&self.ghl_guitar),
            InstrumentIdentity::GhlBass => AnyInstrumentRef::Ghl(&self.ghl_bass),
            InstrumentIdentity::LeadGuitar => AnyInstrumentRef::Standard(&self.lead_guitar),
            InstrumentIdentity::RhythmGuitar => AnyInstrumentRef::Standard(&self.rhythm_guitar),
            InstrumentIdentity::CoopGuitar => AnyInstrumentRef::Standard(&self.coop_guitar),
            InstrumentIdentity::Bass => AnyInstrumentRef::Standard(&self.bass),
            InstrumentIdentity::Keys => AnyInstrumentRef::Standard(&self.keys),
        }
    }

    fn standard_mut(&mut self, identity: InstrumentIdentity) -> Option<&mut Instrument<StandardLane>> {
        Some(match identity {
            InstrumentIdentity::LeadGuitar => &mut self.lead_guitar,
            InstrumentIdentity::RhythmGuitar => &mut self.rhythm_guitar,
            InstrumentIdentity::CoopGuitar => &mut self.coop_guitar,
            InstrumentIdentity::Bass => &mut self.bass,
            InstrumentIdentity::Keys => &mut self.keys,
            _ => return None,
        })
    }

    fn ghl_mut(&mut self, identity: InstrumentIdentity) -> Option<&mut Instrument<GhlLane>> {
        match identity {
            InstrumentIdentity::GhlGuitar => Some(&mut self.ghl_guitar),
            InstrumentIdentity::GhlBass => Some(&mut self.ghl_bass),
            _ => None,
        }
    }

    /// Places a track on an instrument.
    ///
    /// # Errors
    ///
    /// Returns the track back if its lane family does not match the instrument.
    pub fn set_track(
        &mut self,
        identity: InstrumentIdentity,
        difficulty: Difficulty,
        track: AnyTrack,
    ) -> Result<(), AnyTrack> {
        match track {
            AnyTrack::Standard(track) => match self.standard_mut(identity) {
                Some(instrument) => {
                    instrument.set_track(difficulty, track);
                    Ok(())
                }
                None => Err(AnyTrack::Standard(track)),
            },
            AnyTrack::Ghl(track) => match self.ghl_mut(identity) {
                Some(instrument) => {
                    instrument.set_track(difficulty, track);
                    Ok(())
                }
                None => Err(AnyTrack::Ghl(track)),
            },
            AnyTrack::Drums(track) if identity == InstrumentIdentity::Drums => {
                self.drums.set_track(difficulty, track);
                Ok(())
            }
            track @ AnyTrack::Drums(_) => Err(track),
        }
    }

    /// Iterates over the instruments holding at least one non-empty track.
    pub fn existing_instruments(
        &self,
    ) -> impl Iterator<Item = (InstrumentIdentity, AnyInstrumentRef<'_>)> {
        InstrumentIdentity::ALL
            .into_iter()
            .map(|identity| (identity, self.get(identity)))
            .filter(|(_, instrument)| !instrument.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_names_round_trip() {
        for instrument in InstrumentIdentity::ALL {
            assert_eq!(
                InstrumentIdentity::from_part_name(instrument.part_name()),
                Some(instrument)
            );
        }
        assert_eq!(InstrumentIdentity::from_part_name("Vocals"), None);
    }

    #[test]
    fn set_track_checks_family() {
        let mut set = InstrumentSet::default();
        let mut track = Track::<StandardLane>::default();
        track.local_events.push(crate::chart::model::event::Event::new(0, "solo"));

        assert!(
            set.set_track(
                InstrumentIdentity::Drums,
                Difficulty::Expert,
                AnyTrack::Standard(track.clone())
            )
            .is_err()
        );
        assert!(
            set.set_track(
                InstrumentIdentity::Bass,
                Difficulty::Hard,
                AnyTrack::Standard(track)
            )
            .is_ok()
        );
        let existing: Vec<_> = set.bass.existing_tracks().map(|(d, _)| d).collect();
        assert_eq!(existing, vec![Difficulty::Hard]);
        assert_eq!(
            set.existing_instruments().map(|(id, _)| id).collect::<Vec<_>>(),
            vec![InstrumentIdentity::Bass]
        );
    }
}
