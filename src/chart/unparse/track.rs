//! Serializer of difficulty tracks.
//!
//! Chords, local events and special phrases are interleaved by position. At one position, chord
//! lines come first, then events, then phrases.

use std::borrow::Cow;

use itertools::Itertools;
use tracing::trace;

use super::{Result, SectionSerializer, WriteError, events::event_line};
use crate::chart::{
    command::{entry::entry_line, header::track_header},
    config::{SoloNoStarPowerPolicy, UnsupportedModifierPolicy},
    model::{
        chord::{ChartLane, Chord},
        instrument::{Difficulty, InstrumentIdentity},
        track::Track,
    },
    session::{DuplicateKind, WriteSession},
};

/// Renders one difficulty track of an instrument of lane family `L`.
#[derive(Debug)]
pub struct TrackSerializer<'a, L: ChartLane> {
    instrument: InstrumentIdentity,
    difficulty: Difficulty,
    track: &'a Track<L>,
}

impl<'a, L: ChartLane> TrackSerializer<'a, L> {
    /// Creates a serializer of the track.
    #[must_use]
    pub const fn new(
        instrument: InstrumentIdentity,
        difficulty: Difficulty,
        track: &'a Track<L>,
    ) -> Self {
        Self {
            instrument,
            difficulty,
            track,
        }
    }
}

/// Renders the note and modifier lines of a chord. Returns `None` when the chord is skipped.
fn chord_lines<L: ChartLane>(
    chord: &Chord<L>,
    previous: Option<&Chord<L>>,
    session: &WriteSession,
) -> Result<Option<Vec<String>>> {
    let modifier_indices = if L::has_native_modifiers(chord) {
        L::native_modifier_indices(chord)
    } else {
        match session.config.unsupported_modifier_policy {
            UnsupportedModifierPolicy::Throw => {
                return Err(WriteError::UnsupportedModifier {
                    position: chord.position,
                });
            }
            UnsupportedModifierPolicy::IgnoreChord => {
                trace!(position = chord.position, "skipping chord with unsupported modifiers");
                return Ok(None);
            }
            UnsupportedModifierPolicy::IgnoreModifier => L::native_modifier_indices(chord),
            UnsupportedModifierPolicy::Convert => {
                L::fallback_modifier_indices(chord, previous, session.hopo_threshold)
            }
        }
    };

    let notes = chord.notes().iter().map(|note| {
        entry_line(
            chord.position,
            "N",
            format_args!("{} {}", note.lane.encode(), note.sustain),
        )
    });
    let modifiers = modifier_indices
        .into_iter()
        .map(|index| entry_line(chord.position, "N", format_args!("{index} 0")));
    Ok(Some(notes.chain(modifiers).collect()))
}

impl<L: ChartLane> SectionSerializer for TrackSerializer<'_, L> {
    fn header(&self) -> String {
        track_header(self.instrument, self.difficulty)
    }

    fn serialize(&self, session: &WriteSession) -> Result<Vec<String>> {
        let mut track = Cow::Borrowed(self.track);
        if session.config.solo_no_star_power_policy == SoloNoStarPowerPolicy::Convert
            && track.special_phrases.is_empty()
            && track.has_solo_events()
        {
            track.to_mut().convert_solos_to_star_power();
        }

        let mut chords: Vec<(u32, Vec<String>)> = Vec::with_capacity(track.chords.len());
        let mut previous: Option<&Chord<L>> = None;
        for chord in track.chords.iter().sorted_by_key(|chord| chord.position) {
            let is_duplicate = previous.is_some_and(|previous| previous.position == chord.position);
            if session.handle_duplicate(DuplicateKind::Chord, chord.position, || is_duplicate)?
                && let Some(lines) = chord_lines(chord, previous, session)?
            {
                chords.push((chord.position, lines));
            }
            if !is_duplicate {
                previous = Some(chord);
            }
        }

        let events = track
            .local_events
            .iter()
            .sorted_by_key(|event| event.position)
            .map(|event| (event.position, vec![event_line(event)]));

        let mut phrases = track.special_phrases.clone();
        phrases.sort_by_key(|phrase| phrase.position);
        session.handle_overlaps(&mut phrases)?;
        let phrases = phrases.into_iter().map(|phrase| {
            (
                phrase.position,
                vec![entry_line(
                    phrase.position,
                    "S",
                    format_args!("{} {}", phrase.kind.code(), phrase.length),
                )],
            )
        });

        Ok(chords
            .into_iter()
            .merge_by(events, |chord, event| chord.0 <= event.0)
            .merge_by(phrases, |object, phrase| object.0 <= phrase.0)
            .flat_map(|(_, lines)| lines)
            .collect())
    }
}
