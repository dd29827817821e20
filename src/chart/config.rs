//! Policies and configurations of read and write operations.
//!
//! Every policy has a fail-fast variant and at least one best-effort variant. [`ReadConfig`] and
//! [`WriteConfig`] default to failing fast, except for the solo conversion which defaults to
//! [`SoloNoStarPowerPolicy::Convert`].

use std::collections::BTreeSet;

use super::model::instrument::{Difficulty, InstrumentIdentity};

/// How to react to an object whose position and identity are already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicatePolicy {
    /// Fail with an error.
    #[default]
    Throw,
    /// Keep the first occurrence only.
    IncludeFirst,
    /// Keep every occurrence. Keyed values are overwritten by later ones.
    IncludeAll,
}

/// How to react to a special phrase ending after the start of the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlappingPhrasePolicy {
    /// Fail with an error.
    #[default]
    Throw,
    /// Shorten the phrase so that it ends where the next one starts.
    Cut,
}

/// How to react to a note a few ticks away from the chord before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnappedNotesPolicy {
    /// Fail with an error.
    #[default]
    Throw,
    /// Move the note into the chord before it.
    Snap,
    /// Keep the note in its own chord.
    Ignore,
}

/// What to do with `solo` and `soloend` events of tracks without special phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoloNoStarPowerPolicy {
    /// Replace them with star power phrases.
    #[default]
    Convert,
    /// Keep them as local events.
    Ignore,
}

/// What to do with an anchor whose position never received a tempo value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TempolessAnchorPolicy {
    /// Fail with an error.
    #[default]
    Throw,
    /// Discard the anchor.
    Ignore,
    /// Keep a tempo marker with the value of the marker before it, or zero.
    Create,
}

/// What to do with a section header not modeled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnknownSectionPolicy {
    /// Fail with an error.
    #[default]
    Throw,
    /// Keep the body verbatim.
    Store,
}

/// What to do with chords carrying modifiers the format cannot encode natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnsupportedModifierPolicy {
    /// Fail with an error.
    #[default]
    Throw,
    /// Skip the whole chord.
    IgnoreChord,
    /// Write the chord without the unsupported modifiers.
    IgnoreModifier,
    /// Encode the modifiers with the reserved note indices of the format.
    Convert,
}

/// Line terminator of written files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Returns the terminator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Policies of read operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReadConfig {
    /// Applies to notes, chord modifiers, tempo markers, anchors, time signatures and metadata keys.
    pub duplicate_policy: DuplicatePolicy,
    /// Applies to the special phrases of each track.
    pub overlapping_phrase_policy: OverlappingPhrasePolicy,
    /// Applies to notes within [`Self::snap_distance`] of the chord before them.
    pub snapped_notes_policy: SnappedNotesPolicy,
    /// Maximal distance in ticks of a snapped note. Zero disables snapping.
    pub snap_distance: u32,
    /// Applies to tracks with solo events and no special phrase.
    pub solo_no_star_power_policy: SoloNoStarPowerPolicy,
    /// Applies to anchors without tempo value.
    pub tempoless_anchor_policy: TempolessAnchorPolicy,
    /// Applies to headers not modeled by this crate.
    pub unknown_section_policy: UnknownSectionPolicy,
}

impl ReadConfig {
    /// Configuration resolving every policy on a best-effort basis.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::IncludeFirst,
            overlapping_phrase_policy: OverlappingPhrasePolicy::Cut,
            snapped_notes_policy: SnappedNotesPolicy::Ignore,
            snap_distance: 0,
            solo_no_star_power_policy: SoloNoStarPowerPolicy::Convert,
            tempoless_anchor_policy: TempolessAnchorPolicy::Create,
            unknown_section_policy: UnknownSectionPolicy::Store,
        }
    }

    /// Sets the duplicate policy.
    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Sets the overlapping phrase policy.
    #[must_use]
    pub const fn with_overlapping_phrase_policy(mut self, policy: OverlappingPhrasePolicy) -> Self {
        self.overlapping_phrase_policy = policy;
        self
    }

    /// Sets the snapped notes policy along with the snapping distance.
    #[must_use]
    pub const fn with_snapped_notes_policy(
        mut self,
        policy: SnappedNotesPolicy,
        snap_distance: u32,
    ) -> Self {
        self.snapped_notes_policy = policy;
        self.snap_distance = snap_distance;
        self
    }

    /// Sets the solo conversion policy.
    #[must_use]
    pub const fn with_solo_no_star_power_policy(mut self, policy: SoloNoStarPowerPolicy) -> Self {
        self.solo_no_star_power_policy = policy;
        self
    }

    /// Sets the tempoless anchor policy.
    #[must_use]
    pub const fn with_tempoless_anchor_policy(mut self, policy: TempolessAnchorPolicy) -> Self {
        self.tempoless_anchor_policy = policy;
        self
    }

    /// Sets the unknown section policy.
    #[must_use]
    pub const fn with_unknown_section_policy(mut self, policy: UnknownSectionPolicy) -> Self {
        self.unknown_section_policy = policy;
        self
    }
}

/// Policies and formatting of write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriteConfig {
    /// Applies to chords and tempo markers sharing a position.
    pub duplicate_policy: DuplicatePolicy,
    /// Applies to the special phrases of each track.
    pub overlapping_phrase_policy: OverlappingPhrasePolicy,
    /// Applies to tracks with solo events and no special phrase.
    pub solo_no_star_power_policy: SoloNoStarPowerPolicy,
    /// Applies to chords carrying modifiers without native encoding.
    pub unsupported_modifier_policy: UnsupportedModifierPolicy,
    /// Maximal distance in ticks between two chords for the second one to be a natural HOPO.
    /// Defaults to a third of the resolution.
    pub hopo_threshold: Option<u32>,
    /// Line terminator.
    pub line_ending: LineEnding,
}

impl WriteConfig {
    /// Sets the duplicate policy.
    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Sets the overlapping phrase policy.
    #[must_use]
    pub const fn with_overlapping_phrase_policy(mut self, policy: OverlappingPhrasePolicy) -> Self {
        self.overlapping_phrase_policy = policy;
        self
    }

    /// Sets the solo conversion policy.
    #[must_use]
    pub const fn with_solo_no_star_power_policy(mut self, policy: SoloNoStarPowerPolicy) -> Self {
        self.solo_no_star_power_policy = policy;
        self
    }

    /// Sets the unsupported modifier policy.
    #[must_use]
    pub const fn with_unsupported_modifier_policy(
        mut self,
        policy: UnsupportedModifierPolicy,
    ) -> Self {
        self.unsupported_modifier_policy = policy;
        self
    }

    /// Overrides the natural HOPO threshold.
    #[must_use]
    pub const fn with_hopo_threshold(mut self, threshold: u32) -> Self {
        self.hopo_threshold = Some(threshold);
        self
    }

    /// Sets the line terminator.
    #[must_use]
    pub const fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Returns the natural HOPO threshold for the resolution.
    #[must_use]
    pub const fn hopo_threshold_for(&self, resolution: u16) -> u32 {
        match self.hopo_threshold {
            Some(threshold) => threshold,
            None => resolution as u32 / 3,
        }
    }
}

/// Difficulties selected for every instrument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentComponentList {
    tracks: BTreeSet<(InstrumentIdentity, Difficulty)>,
}

impl InstrumentComponentList {
    /// Selects every difficulty of every instrument.
    #[must_use]
    pub fn full() -> Self {
        Self {
            tracks: InstrumentIdentity::ALL
                .into_iter()
                .flat_map(|instrument| {
                    Difficulty::ALL
                        .into_iter()
                        .map(move |difficulty| (instrument, difficulty))
                })
                .collect(),
        }
    }

    /// Selects one difficulty of an instrument.
    pub fn insert(&mut self, instrument: InstrumentIdentity, difficulty: Difficulty) {
        self.tracks.insert((instrument, difficulty));
    }

    /// Selects every difficulty of an instrument.
    pub fn insert_instrument(&mut self, instrument: InstrumentIdentity) {
        for difficulty in Difficulty::ALL {
            self.insert(instrument, difficulty);
        }
    }

    /// Checks whether the difficulty of the instrument is selected.
    #[must_use]
    pub fn contains(&self, instrument: InstrumentIdentity, difficulty: Difficulty) -> bool {
        self.tracks.contains(&(instrument, difficulty))
    }

    /// Iterates over the selected tracks.
    pub fn iter(&self) -> impl Iterator<Item = (InstrumentIdentity, Difficulty)> + '_ {
        self.tracks.iter().copied()
    }

    /// Checks whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Sections selected for a read or write operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentList {
    /// `[Song]`
    pub metadata: bool,
    /// `[SyncTrack]`
    pub sync_track: bool,
    /// `[Events]`
    pub global_events: bool,
    /// Difficulty tracks.
    pub instruments: InstrumentComponentList,
    /// Sections not modeled by this crate.
    pub unknown_sections: bool,
}

impl ComponentList {
    /// Selects every section.
    #[must_use]
    pub fn full() -> Self {
        Self {
            metadata: true,
            sync_track: true,
            global_events: true,
            instruments: InstrumentComponentList::full(),
            unknown_sections: true,
        }
    }

    /// Selects the sections shared by every instrument.
    #[must_use]
    pub fn global() -> Self {
        Self {
            metadata: true,
            sync_track: true,
            global_events: true,
            ..Self::default()
        }
    }

    /// Selects only the sync track.
    #[must_use]
    pub fn sync_track() -> Self {
        Self {
            sync_track: true,
            ..Self::default()
        }
    }

    /// Selects only the given tracks.
    #[must_use]
    pub fn instruments(instruments: InstrumentComponentList) -> Self {
        Self {
            instruments,
            ..Self::default()
        }
    }
}
