//! Chords and notes of the three lane families: five-fret ([`StandardLane`]), six-fret
//! ([`GhlLane`]) and drums ([`DrumsLane`]).
//!
//! [`Chord`] is generic over the [`Lane`] capability trait, which carries the lane set, the chord
//! modifiers type and whether open notes are exclusive. [`ChartLane`] adds the note index
//! conventions of the `.chart` format.

use bitflags::bitflags;

use super::TrackObject;
use crate::chart::command::note_index;

/// Serialization bounds required from lanes and modifiers when the `serde` feature is enabled.
#[cfg(feature = "serde")]
pub trait MaybeSerde: serde::Serialize + serde::de::DeserializeOwned {}
#[cfg(feature = "serde")]
impl<T: serde::Serialize + serde::de::DeserializeOwned> MaybeSerde for T {}

/// Serialization bounds required from lanes and modifiers when the `serde` feature is enabled.
#[cfg(not(feature = "serde"))]
pub trait MaybeSerde {}
#[cfg(not(feature = "serde"))]
impl<T> MaybeSerde for T {}

/// Operations shared by every chord modifier flag set.
pub trait ChordModifiers:
    Copy + Eq + Default + std::fmt::Debug + Send + Sync + MaybeSerde + 'static
{
    /// Checks whether all flags of `other` are set.
    fn contains(self, other: Self) -> bool;
    /// Sets all flags of `other`.
    fn insert(&mut self, other: Self);
    /// Returns the flags set in `self` but not in `other`.
    fn difference(self, other: Self) -> Self;
    /// Checks whether no flag is set.
    fn is_empty(self) -> bool;
}

macro_rules! impl_chord_modifiers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ChordModifiers for $ty {
                fn contains(self, other: Self) -> bool {
                    <$ty>::contains(&self, other)
                }
                fn insert(&mut self, other: Self) {
                    <$ty>::insert(self, other);
                }
                fn difference(self, other: Self) -> Self {
                    <$ty>::difference(self, other)
                }
                fn is_empty(self) -> bool {
                    <$ty>::is_empty(&self)
                }
            }
        )*
    };
}

bitflags! {
    /// Modifiers affecting how a five-fret chord is played.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StandardModifiers: u8 {
        /// The HOPO state does not depend on the previous chord.
        const EXPLICIT_HOPO = 1;
        /// Forces a HOPO with [`Self::EXPLICIT_HOPO`], otherwise inverts the natural state.
        const HOPO_INVERT = 1 << 1;
        /// The chord can be played without strumming.
        const TAP = 1 << 2;
        /// Big rock ending chord.
        const BIG = 1 << 3;
        /// Always a HOPO.
        const FORCED_HOPO = Self::EXPLICIT_HOPO.bits() | Self::HOPO_INVERT.bits();
        /// Always strummed.
        const FORCED_STRUM = Self::EXPLICIT_HOPO.bits();
    }
}

bitflags! {
    /// Modifiers affecting how a six-fret chord is played.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct GhlModifiers: u8 {
        /// The HOPO state does not depend on the previous chord.
        const EXPLICIT_HOPO = 1;
        /// Forces a HOPO with [`Self::EXPLICIT_HOPO`], otherwise inverts the natural state.
        const HOPO_INVERT = 1 << 1;
        /// The chord can be played without strumming.
        const TAP = 1 << 2;
        /// Always a HOPO.
        const FORCED_HOPO = Self::EXPLICIT_HOPO.bits() | Self::HOPO_INVERT.bits();
        /// Always strummed.
        const FORCED_STRUM = Self::EXPLICIT_HOPO.bits();
    }
}

bitflags! {
    /// Modifiers affecting how a drums chord is played.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    ///
    /// Accents and ghosts are marked per pad, cymbals per cymbal-capable pad.
    pub struct DrumsModifiers: u16 {
        /// Pads of the chord are hit as a flam.
        const FLAM = 1;
        /// The yellow pad is a cymbal.
        const YELLOW_CYMBAL = 1 << 1;
        /// The blue pad is a cymbal.
        const BLUE_CYMBAL = 1 << 2;
        /// The green pad is a cymbal.
        const GREEN_CYMBAL = 1 << 3;
        /// The red pad is hit harder.
        const RED_ACCENT = 1 << 4;
        /// The yellow pad is hit harder.
        const YELLOW_ACCENT = 1 << 5;
        /// The blue pad is hit harder.
        const BLUE_ACCENT = 1 << 6;
        /// The four-lane green or five-lane orange pad is hit harder.
        const GREEN_ACCENT = 1 << 7;
        /// The five-lane green pad is hit harder.
        const GREEN5_ACCENT = 1 << 8;
        /// The red pad is hit softer.
        const RED_GHOST = 1 << 9;
        /// The yellow pad is hit softer.
        const YELLOW_GHOST = 1 << 10;
        /// The blue pad is hit softer.
        const BLUE_GHOST = 1 << 11;
        /// The four-lane green or five-lane orange pad is hit softer.
        const GREEN_GHOST = 1 << 12;
        /// The five-lane green pad is hit softer.
        const GREEN5_GHOST = 1 << 13;
    }
}

impl_chord_modifiers!(StandardModifiers, GhlModifiers, DrumsModifiers);

/// A slot a note occupies, specific to an instrument family.
pub trait Lane:
    Copy + Eq + Ord + std::hash::Hash + std::fmt::Debug + Send + Sync + MaybeSerde + 'static
{
    /// Flags a chord of this family can carry.
    type Modifiers: ChordModifiers;

    /// Whether an open note and any other lane are mutually exclusive in one chord.
    const OPEN_EXCLUSIVITY: bool;

    /// Checks whether the lane is the open note.
    fn is_open(self) -> bool;
}

/// Frets of a five-fret instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum StandardLane {
    Open,
    Green,
    Red,
    Yellow,
    Blue,
    Orange,
}

/// Frets of a six-fret instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum GhlLane {
    Open,
    Black1,
    Black2,
    Black3,
    White1,
    White2,
    White3,
}

/// Pads and pedals of drums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrumsLane {
    /// Kick pedal.
    Kick,
    /// Red pad.
    Red,
    /// Yellow pad.
    Yellow,
    /// Blue pad.
    Blue,
    /// Green with four pads, orange with five pads.
    Green4LaneOrange5Lane,
    /// Green with five pads, otherwise played as [`Self::Green4LaneOrange5Lane`].
    Green5Lane,
    /// Kick only played with a double pedal.
    DoubleKick,
}

impl Lane for StandardLane {
    type Modifiers = StandardModifiers;
    const OPEN_EXCLUSIVITY: bool = true;

    fn is_open(self) -> bool {
        self == Self::Open
    }
}

impl Lane for GhlLane {
    type Modifiers = GhlModifiers;
    const OPEN_EXCLUSIVITY: bool = true;

    fn is_open(self) -> bool {
        self == Self::Open
    }
}

impl Lane for DrumsLane {
    type Modifiers = DrumsModifiers;
    const OPEN_EXCLUSIVITY: bool = false;

    fn is_open(self) -> bool {
        false
    }
}

/// A note, owned by its chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note<L> {
    /// Lane of the note.
    pub lane: L,
    /// Held duration in ticks.
    pub sustain: u32,
}

impl<L> Note<L> {
    /// Creates a new note.
    pub const fn new(lane: L, sustain: u32) -> Self {
        Self { lane, sustain }
    }
}

/// A set of notes sharing one position.
///
/// Lanes are unique within a chord. When [`Lane::OPEN_EXCLUSIVITY`] holds, adding an open note to
/// a chord holding other lanes, or another lane to a chord holding the open note, clears the chord
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chord<L: Lane> {
    /// Position in ticks.
    pub position: u32,
    notes: Vec<Note<L>>,
    /// Flags affecting how the chord is played.
    pub modifiers: L::Modifiers,
}

/// A five-fret chord.
pub type StandardChord = Chord<StandardLane>;
/// A six-fret chord.
pub type GhlChord = Chord<GhlLane>;
/// A drums chord.
pub type DrumsChord = Chord<DrumsLane>;

impl<L: Lane> Chord<L> {
    /// Creates an empty chord without modifiers.
    #[must_use]
    pub fn new(position: u32) -> Self {
        Self {
            position,
            notes: Vec::new(),
            modifiers: L::Modifiers::default(),
        }
    }

    /// Creates a chord holding the notes, added in order.
    #[must_use]
    pub fn with_notes(position: u32, notes: impl IntoIterator<Item = Note<L>>) -> Self {
        let mut chord = Self::new(position);
        for note in notes {
            chord.add_note(note);
        }
        chord
    }

    /// Returns the notes of the chord in insertion order.
    #[must_use]
    pub fn notes(&self) -> &[Note<L>] {
        &self.notes
    }

    /// Returns the note on the lane, if any.
    #[must_use]
    pub fn note(&self, lane: L) -> Option<&Note<L>> {
        self.notes.iter().find(|note| note.lane == lane)
    }

    /// Checks whether a note is on the lane.
    #[must_use]
    pub fn contains_lane(&self, lane: L) -> bool {
        self.note(lane).is_some()
    }

    /// Adds a note, replacing any note on the same lane and applying open exclusivity.
    pub fn add_note(&mut self, note: Note<L>) {
        if L::OPEN_EXCLUSIVITY
            && (note.lane.is_open() || self.notes.iter().any(|existing| existing.lane.is_open()))
        {
            self.notes.clear();
        }
        if let Some(existing) = self.notes.iter_mut().find(|existing| existing.lane == note.lane)
        {
            *existing = note;
        } else {
            self.notes.push(note);
        }
    }

    /// Removes the note on the lane, returning it.
    pub fn remove_lane(&mut self, lane: L) -> Option<Note<L>> {
        let index = self.notes.iter().position(|note| note.lane == lane)?;
        Some(self.notes.remove(index))
    }

    /// Checks whether the chord holds no note.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Checks whether both chords hold the same set of lanes.
    #[must_use]
    pub fn same_lanes(&self, other: &Self) -> bool {
        self.notes.len() == other.notes.len()
            && self.notes.iter().all(|note| other.contains_lane(note.lane))
    }
}

impl<L: Lane> TrackObject for Chord<L> {
    fn position(&self) -> u32 {
        self.position
    }
}

/// What the index of an `N` entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteIndex<L: Lane> {
    /// A note on the lane.
    Lane(L),
    /// A flag of the chord.
    Modifier(L::Modifiers),
}

/// Note index conventions of the `.chart` format for a lane family.
pub trait ChartLane: Lane {
    /// Decodes the index of an `N` entry. Returns `None` for indices unknown to the family.
    fn decode(index: u8) -> Option<NoteIndex<Self>>;

    /// Encodes the lane as the index of an `N` entry.
    fn encode(self) -> u8;

    /// Returns the modifiers the format encodes natively.
    fn native_modifiers() -> Self::Modifiers;

    /// Returns the indices encoding the natively supported modifiers of the chord.
    fn native_modifier_indices(chord: &Chord<Self>) -> Vec<u8>;

    /// Returns the indices encoding every modifier of the chord, using the format's reserved
    /// indices for modifiers without a native encoding. Modifiers with no encoding at all are
    /// dropped.
    fn fallback_modifier_indices(
        chord: &Chord<Self>,
        previous: Option<&Chord<Self>>,
        hopo_threshold: u32,
    ) -> Vec<u8>;

    /// Checks whether the chord only carries natively supported modifiers.
    fn has_native_modifiers(chord: &Chord<Self>) -> bool {
        chord
            .modifiers
            .difference(Self::native_modifiers())
            .is_empty()
    }
}

/// Checks whether a chord is a HOPO without any modifier: a single note close enough to a
/// previous chord holding other lanes.
#[must_use]
pub fn is_natural_hopo<L: Lane>(
    chord: &Chord<L>,
    previous: Option<&Chord<L>>,
    hopo_threshold: u32,
) -> bool {
    previous.is_some_and(|previous| {
        chord.notes().len() == 1
            && chord.position.saturating_sub(previous.position) <= hopo_threshold
            && !chord.same_lanes(previous)
    })
}

/// Computes the HOPO and tap indices of a fretted chord from explicit flags.
fn fretted_fallback_indices(
    explicit_hopo: bool,
    hopo_invert: bool,
    tap: bool,
    natural_hopo: bool,
) -> Vec<u8> {
    let mut indices = vec![];
    // Explicit states are written as an inversion relative to the natural state.
    let write_invert = if explicit_hopo {
        hopo_invert != natural_hopo
    } else {
        hopo_invert
    };
    if write_invert {
        indices.push(note_index::HOPO_INVERT);
    }
    if tap {
        indices.push(note_index::TAP);
    }
    indices
}

impl ChartLane for StandardLane {
    fn decode(index: u8) -> Option<NoteIndex<Self>> {
        Some(match index {
            0 => NoteIndex::Lane(Self::Green),
            1 => NoteIndex::Lane(Self::Red),
            2 => NoteIndex::Lane(Self::Yellow),
            3 => NoteIndex::Lane(Self::Blue),
            4 => NoteIndex::Lane(Self::Orange),
            note_index::HOPO_INVERT => NoteIndex::Modifier(StandardModifiers::HOPO_INVERT),
            note_index::TAP => NoteIndex::Modifier(StandardModifiers::TAP),
            note_index::OPEN => NoteIndex::Lane(Self::Open),
            _ => return None,
        })
    }

    fn encode(self) -> u8 {
        match self {
            Self::Open => note_index::OPEN,
            fret => fret as u8 - 1 + note_index::STANDARD_FIRST_FRET,
        }
    }

    fn native_modifiers() -> Self::Modifiers {
        StandardModifiers::HOPO_INVERT | StandardModifiers::TAP
    }

    fn native_modifier_indices(chord: &Chord<Self>) -> Vec<u8> {
        fretted_fallback_indices(
            false,
            chord.modifiers.contains(StandardModifiers::HOPO_INVERT),
            chord.modifiers.contains(StandardModifiers::TAP),
            false,
        )
    }

    fn fallback_modifier_indices(
        chord: &Chord<Self>,
        previous: Option<&Chord<Self>>,
        hopo_threshold: u32,
    ) -> Vec<u8> {
        fretted_fallback_indices(
            chord.modifiers.contains(StandardModifiers::EXPLICIT_HOPO),
            chord.modifiers.contains(StandardModifiers::HOPO_INVERT),
            chord.modifiers.contains(StandardModifiers::TAP),
            is_natural_hopo(chord, previous, hopo_threshold),
        )
    }
}

impl ChartLane for GhlLane {
    fn decode(index: u8) -> Option<NoteIndex<Self>> {
        Some(match index {
            0 => NoteIndex::Lane(Self::White1),
            1 => NoteIndex::Lane(Self::White2),
            2 => NoteIndex::Lane(Self::White3),
            3 => NoteIndex::Lane(Self::Black1),
            4 => NoteIndex::Lane(Self::Black2),
            note_index::HOPO_INVERT => NoteIndex::Modifier(GhlModifiers::HOPO_INVERT),
            note_index::TAP => NoteIndex::Modifier(GhlModifiers::TAP),
            note_index::OPEN => NoteIndex::Lane(Self::Open),
            note_index::GHL_BLACK3 => NoteIndex::Lane(Self::Black3),
            _ => return None,
        })
    }

    fn encode(self) -> u8 {
        match self {
            Self::White1 => 0,
            Self::White2 => 1,
            Self::White3 => 2,
            Self::Black1 => 3,
            Self::Black2 => 4,
            Self::Open => note_index::OPEN,
            Self::Black3 => note_index::GHL_BLACK3,
        }
    }

    fn native_modifiers() -> Self::Modifiers {
        GhlModifiers::HOPO_INVERT | GhlModifiers::TAP
    }

    fn native_modifier_indices(chord: &Chord<Self>) -> Vec<u8> {
        fretted_fallback_indices(
            false,
            chord.modifiers.contains(GhlModifiers::HOPO_INVERT),
            chord.modifiers.contains(GhlModifiers::TAP),
            false,
        )
    }

    fn fallback_modifier_indices(
        chord: &Chord<Self>,
        previous: Option<&Chord<Self>>,
        hopo_threshold: u32,
    ) -> Vec<u8> {
        fretted_fallback_indices(
            chord.modifiers.contains(GhlModifiers::EXPLICIT_HOPO),
            chord.modifiers.contains(GhlModifiers::HOPO_INVERT),
            chord.modifiers.contains(GhlModifiers::TAP),
            is_natural_hopo(chord, previous, hopo_threshold),
        )
    }
}

const DRUMS_CYMBALS: [(DrumsLane, DrumsModifiers); 3] = [
    (DrumsLane::Yellow, DrumsModifiers::YELLOW_CYMBAL),
    (DrumsLane::Blue, DrumsModifiers::BLUE_CYMBAL),
    (DrumsLane::Green4LaneOrange5Lane, DrumsModifiers::GREEN_CYMBAL),
];

const DRUMS_ACCENTS: [(DrumsLane, DrumsModifiers); 5] = [
    (DrumsLane::Red, DrumsModifiers::RED_ACCENT),
    (DrumsLane::Yellow, DrumsModifiers::YELLOW_ACCENT),
    (DrumsLane::Blue, DrumsModifiers::BLUE_ACCENT),
    (DrumsLane::Green4LaneOrange5Lane, DrumsModifiers::GREEN_ACCENT),
    (DrumsLane::Green5Lane, DrumsModifiers::GREEN5_ACCENT),
];

const DRUMS_GHOSTS: [(DrumsLane, DrumsModifiers); 5] = [
    (DrumsLane::Red, DrumsModifiers::RED_GHOST),
    (DrumsLane::Yellow, DrumsModifiers::YELLOW_GHOST),
    (DrumsLane::Blue, DrumsModifiers::BLUE_GHOST),
    (DrumsLane::Green4LaneOrange5Lane, DrumsModifiers::GREEN_GHOST),
    (DrumsLane::Green5Lane, DrumsModifiers::GREEN5_GHOST),
];

fn pad_flag(table: &[(DrumsLane, DrumsModifiers)], lane: DrumsLane) -> Option<DrumsModifiers> {
    table
        .iter()
        .find(|(pad, _)| *pad == lane)
        .map(|&(_, flag)| flag)
}

impl DrumsLane {
    /// Checks whether the lane is one of the five pads, excluding kicks.
    #[must_use]
    pub const fn is_pad(self) -> bool {
        !matches!(self, Self::Kick | Self::DoubleKick)
    }

    /// Returns the modifier marking this pad as a cymbal, if it can be one.
    #[must_use]
    pub fn cymbal(self) -> Option<DrumsModifiers> {
        pad_flag(&DRUMS_CYMBALS, self)
    }

    /// Returns the modifier accenting this pad. Kicks have none.
    #[must_use]
    pub fn accent(self) -> Option<DrumsModifiers> {
        pad_flag(&DRUMS_ACCENTS, self)
    }

    /// Returns the modifier ghosting this pad. Kicks have none.
    #[must_use]
    pub fn ghost(self) -> Option<DrumsModifiers> {
        pad_flag(&DRUMS_GHOSTS, self)
    }

    /// Decodes the pad written at `index - offset` and looks up its flag in `table`.
    fn decode_pad_flag(
        index: u8,
        offset: u8,
        table: &[(Self, DrumsModifiers)],
    ) -> Option<NoteIndex<Self>> {
        let NoteIndex::Lane(lane) = Self::decode(index.checked_sub(offset)?)? else {
            return None;
        };
        pad_flag(table, lane).map(NoteIndex::Modifier)
    }

    /// Encodes every flag of `table` set on the chord at `pad index + offset`.
    fn encode_pad_flags(
        chord: &Chord<Self>,
        offset: u8,
        table: &[(Self, DrumsModifiers)],
    ) -> impl Iterator<Item = u8> {
        table
            .iter()
            .filter(move |(_, flag)| chord.modifiers.contains(*flag))
            .map(move |(lane, _)| lane.encode() + offset)
    }
}

impl ChartLane for DrumsLane {
    fn decode(index: u8) -> Option<NoteIndex<Self>> {
        const ACCENT_FIRST: u8 = note_index::DRUMS_ACCENT_OFFSET + 1;
        const ACCENT_LAST: u8 = note_index::DRUMS_ACCENT_OFFSET + 5;
        const GHOST_FIRST: u8 = note_index::DRUMS_GHOST_OFFSET + 1;
        const GHOST_LAST: u8 = note_index::DRUMS_GHOST_OFFSET + 5;

        Some(match index {
            0 => NoteIndex::Lane(Self::Kick),
            1 => NoteIndex::Lane(Self::Red),
            2 => NoteIndex::Lane(Self::Yellow),
            3 => NoteIndex::Lane(Self::Blue),
            4 => NoteIndex::Lane(Self::Green4LaneOrange5Lane),
            5 => NoteIndex::Lane(Self::Green5Lane),
            note_index::DRUMS_DOUBLE_KICK => NoteIndex::Lane(Self::DoubleKick),
            ACCENT_FIRST..=ACCENT_LAST => {
                Self::decode_pad_flag(index, note_index::DRUMS_ACCENT_OFFSET, &DRUMS_ACCENTS)?
            }
            GHOST_FIRST..=GHOST_LAST => {
                Self::decode_pad_flag(index, note_index::DRUMS_GHOST_OFFSET, &DRUMS_GHOSTS)?
            }
            note_index::DRUMS_FLAM => NoteIndex::Modifier(DrumsModifiers::FLAM),
            cymbal if cymbal > note_index::DRUMS_CYMBAL_OFFSET => {
                Self::decode_pad_flag(cymbal, note_index::DRUMS_CYMBAL_OFFSET, &DRUMS_CYMBALS)?
            }
            _ => return None,
        })
    }

    fn encode(self) -> u8 {
        match self {
            Self::DoubleKick => note_index::DRUMS_DOUBLE_KICK,
            lane => lane as u8,
        }
    }

    fn native_modifiers() -> Self::Modifiers {
        DrumsModifiers::FLAM
            | DrumsModifiers::YELLOW_CYMBAL
            | DrumsModifiers::BLUE_CYMBAL
            | DrumsModifiers::GREEN_CYMBAL
    }

    fn native_modifier_indices(chord: &Chord<Self>) -> Vec<u8> {
        let mut indices: Vec<u8> =
            Self::encode_pad_flags(chord, note_index::DRUMS_CYMBAL_OFFSET, &DRUMS_CYMBALS)
                .collect();
        if chord.modifiers.contains(DrumsModifiers::FLAM) {
            indices.push(note_index::DRUMS_FLAM);
        }
        indices
    }

    fn fallback_modifier_indices(
        chord: &Chord<Self>,
        _previous: Option<&Chord<Self>>,
        _hopo_threshold: u32,
    ) -> Vec<u8> {
        let mut indices = Self::native_modifier_indices(chord);
        indices.extend(Self::encode_pad_flags(
            chord,
            note_index::DRUMS_ACCENT_OFFSET,
            &DRUMS_ACCENTS,
        ));
        indices.extend(Self::encode_pad_flags(
            chord,
            note_index::DRUMS_GHOST_OFFSET,
            &DRUMS_GHOSTS,
        ));
        indices
    }
}
