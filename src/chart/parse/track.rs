//! Parser of difficulty tracks: notes, chord modifiers, local events and special phrases.

use tracing::trace;

use super::{ParsedSection, Result, SectionParser};
use crate::chart::{
    command::entry::{TrackEntry, next_value},
    config::SoloNoStarPowerPolicy,
    model::{
        chord::{ChartLane, Chord, ChordModifiers, Note, NoteIndex},
        event::Event,
        instrument::{AnyTrack, Difficulty, InstrumentIdentity},
        track::{Phrase, PhraseKind, Track},
    },
    session::{DuplicateKind, ReadSession},
};

/// Parses one difficulty track of an instrument of lane family `L`.
///
/// Notes are attached to a current chord. Notes at a later position than the last chord start a
/// new chord at the end, and misplaced notes are inserted at their sorted index.
#[derive(Debug)]
pub struct TrackParser<L: ChartLane> {
    session: ReadSession,
    instrument: InstrumentIdentity,
    difficulty: Difficulty,
    track: Track<L>,
    current: Option<usize>,
}

impl<L: ChartLane> TrackParser<L> {
    /// Creates a parser of the track.
    #[must_use]
    pub fn new(
        session: ReadSession,
        instrument: InstrumentIdentity,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            session,
            instrument,
            difficulty,
            track: Track::default(),
            current: None,
        }
    }

    /// Returns the index of the chord a note at the position belongs to, creating it if needed.
    fn locate_chord(&mut self, position: u32) -> Result<usize> {
        if let Some(current) = self.current
            && let Some(chord) = self.track.chords.get(current)
        {
            if chord.position == position {
                return Ok(current);
            }
            if self.session.is_snapped(chord.position, position)
                && self.session.handle_snap(chord.position, position)?
            {
                return Ok(current);
            }
        }

        let chords = &mut self.track.chords;
        let index = match chords.last() {
            Some(last) if position <= last.position => {
                match chords.binary_search_by_key(&position, |chord| chord.position) {
                    Ok(found) => found,
                    Err(insert_at) => {
                        trace!(position, "inserting misplaced chord");
                        chords.insert(insert_at, Chord::new(position));
                        insert_at
                    }
                }
            }
            _ => {
                chords.push(Chord::new(position));
                chords.len() - 1
            }
        };
        self.current = Some(index);
        Ok(index)
    }

    fn handle_note(&mut self, entry: &TrackEntry) -> Result<()> {
        let mut values = entry.values();
        let index: u8 = next_value(&mut values, "note index")?;
        let sustain: u32 = next_value(&mut values, "sustain")?;
        let Some(decoded) = L::decode(index) else {
            trace!(index, position = entry.position, "ignoring unknown note index");
            return Ok(());
        };

        let chord_index = self.locate_chord(entry.position)?;
        let session = self.session;
        let Some(chord) = self.track.chords.get_mut(chord_index) else {
            return Ok(());
        };
        match decoded {
            NoteIndex::Lane(lane) => {
                if session.handle_duplicate(DuplicateKind::Note, chord.position, || {
                    chord.contains_lane(lane)
                })? {
                    chord.add_note(Note::new(lane, sustain));
                }
            }
            NoteIndex::Modifier(modifier) => {
                if session.handle_duplicate(DuplicateKind::ChordModifier, chord.position, || {
                    chord.modifiers.contains(modifier)
                })? {
                    chord.modifiers.insert(modifier);
                }
            }
        }
        Ok(())
    }

    fn handle_phrase(&mut self, entry: &TrackEntry) -> Result<()> {
        let mut values = entry.values();
        let code: u8 = next_value(&mut values, "phrase type")?;
        let length: u32 = next_value(&mut values, "phrase length")?;
        self.track.special_phrases.push(Phrase::new(
            entry.position,
            length,
            PhraseKind::from_code(code),
        ));
        Ok(())
    }
}

impl<L: ChartLane> SectionParser for TrackParser<L>
where
    Track<L>: Into<AnyTrack>,
{
    fn handle_line(&mut self, line: &str) -> Result<()> {
        let entry = TrackEntry::parse(line)?;
        match entry.kind {
            "N" => self.handle_note(&entry)?,
            "E" => self
                .track
                .local_events
                .push(Event::new(entry.position, entry.text())),
            "S" => self.handle_phrase(&entry)?,
            kind => trace!(kind, position = entry.position, "ignoring track entry"),
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<ParsedSection> {
        let Self {
            session,
            instrument,
            difficulty,
            mut track,
            ..
        } = *self;
        track.local_events.sort_by_key(|event| event.position);
        track.special_phrases.sort_by_key(|phrase| phrase.position);
        if session.config.solo_no_star_power_policy == SoloNoStarPowerPolicy::Convert
            && track.convert_solos_to_star_power()
        {
            trace!(?instrument, ?difficulty, "converted solos to star power");
        }
        session.handle_overlaps(&mut track.special_phrases)?;
        Ok(ParsedSection::Track {
            instrument,
            difficulty,
            track: track.into(),
        })
    }
}
