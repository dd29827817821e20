//! Parser of `[SyncTrack]`.
//!
//! Tempo values (`B`) and anchors (`A`) share one marker per position. An anchor arriving before
//! the value of its position leaves a marker without value, which either receives its value later
//! or is resolved by the tempoless anchor policy on completion.

use std::time::Duration;

use tracing::trace;

use super::{ParseError, ParsedSection, Result, SectionParser};
use crate::chart::{
    command::{
        entry::{TrackEntry, next_value, parse_value},
        from_fixed_point,
    },
    model::sync_track::{SyncTrack, Tempo, TimeSignature},
    session::{DuplicateKind, ReadSession},
};

/// Exponent of the default time signature denominator.
const DEFAULT_DENOMINATOR_EXPONENT: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTempo {
    position: u32,
    value: Option<f64>,
    anchor: Option<Duration>,
}

/// Parses `[SyncTrack]`.
#[derive(Debug)]
pub struct SyncTrackParser {
    session: ReadSession,
    markers: Vec<PendingTempo>,
    time_signatures: Vec<TimeSignature>,
}

impl SyncTrackParser {
    /// Creates a parser.
    #[must_use]
    pub const fn new(session: ReadSession) -> Self {
        Self {
            session,
            markers: Vec::new(),
            time_signatures: Vec::new(),
        }
    }

    /// Returns the index of the marker at the position, creating it at its sorted index if needed.
    fn marker_index(&mut self, position: u32) -> usize {
        match self.markers.last() {
            Some(last) if last.position == position => self.markers.len() - 1,
            Some(last) if last.position > position => {
                match self
                    .markers
                    .binary_search_by_key(&position, |marker| marker.position)
                {
                    Ok(found) => found,
                    Err(insert_at) => {
                        self.markers.insert(insert_at, PendingTempo::new(position));
                        insert_at
                    }
                }
            }
            _ => {
                self.markers.push(PendingTempo::new(position));
                self.markers.len() - 1
            }
        }
    }

    fn handle_tempo(&mut self, entry: &TrackEntry) -> Result<()> {
        let raw: i64 = next_value(&mut entry.values(), "tempo value")?;
        let index = self.marker_index(entry.position);
        let session = self.session;
        if let Some(marker) = self.markers.get_mut(index)
            && session.handle_duplicate(DuplicateKind::TempoMarker, entry.position, || {
                marker.value.is_some()
            })?
        {
            marker.value = Some(from_fixed_point(raw));
        }
        Ok(())
    }

    fn handle_anchor(&mut self, entry: &TrackEntry) -> Result<()> {
        let micros: u64 = next_value(&mut entry.values(), "anchor")?;
        let index = self.marker_index(entry.position);
        let session = self.session;
        if let Some(marker) = self.markers.get_mut(index)
            && session.handle_duplicate(DuplicateKind::Anchor, entry.position, || {
                marker.anchor.is_some()
            })?
        {
            marker.anchor = Some(Duration::from_micros(micros));
        }
        Ok(())
    }

    fn handle_time_signature(&mut self, entry: &TrackEntry) -> Result<()> {
        let mut values = entry.values();
        let numerator: u8 = next_value(&mut values, "time signature numerator")?;
        let exponent = match values.next() {
            Some(raw) => parse_value(raw, "denominator exponent")?,
            None => DEFAULT_DENOMINATOR_EXPONENT,
        };
        let signature = TimeSignature::from_exponent(entry.position, numerator, exponent)
            .ok_or_else(|| ParseError::ExpectedValue {
                what: "denominator exponent",
                found: exponent.to_string(),
            })?;

        let insert_at = self
            .time_signatures
            .partition_point(|existing| existing.position <= entry.position);
        let previous = insert_at
            .checked_sub(1)
            .and_then(|index| self.time_signatures.get(index));
        if self
            .session
            .handle_duplicate(DuplicateKind::TimeSignature, entry.position, || {
                previous.is_some_and(|previous| previous.position == entry.position)
            })?
        {
            self.time_signatures.insert(insert_at, signature);
        }
        Ok(())
    }
}

impl PendingTempo {
    const fn new(position: u32) -> Self {
        Self {
            position,
            value: None,
            anchor: None,
        }
    }
}

impl SectionParser for SyncTrackParser {
    fn handle_line(&mut self, line: &str) -> Result<()> {
        let entry = TrackEntry::parse(line)?;
        match entry.kind {
            "B" => self.handle_tempo(&entry),
            "A" => self.handle_anchor(&entry),
            "TS" => self.handle_time_signature(&entry),
            kind => {
                trace!(kind, position = entry.position, "ignoring sync track entry");
                Ok(())
            }
        }
    }

    fn finish(self: Box<Self>) -> Result<ParsedSection> {
        let mut tempo: Vec<Tempo> = Vec::with_capacity(self.markers.len());
        for marker in self.markers {
            match (marker.value, marker.anchor) {
                (Some(value), anchor) => tempo.push(Tempo {
                    position: marker.position,
                    value,
                    anchor,
                }),
                (None, Some(anchor)) => {
                    if let Some(created) = self.session.handle_tempoless_anchor(
                        marker.position,
                        anchor,
                        tempo.last(),
                    )? {
                        tempo.push(created);
                    }
                }
                (None, None) => {}
            }
        }
        Ok(ParsedSection::SyncTrack(SyncTrack {
            tempo,
            time_signatures: self.time_signatures,
        }))
    }
}
