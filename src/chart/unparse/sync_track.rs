//! Serializer of `[SyncTrack]`.

use itertools::{Either, Itertools};

use super::{Result, SectionSerializer};
use crate::chart::{
    command::{entry::entry_line, fixed_point, header::SYNC_TRACK_HEADER},
    model::sync_track::{SyncTrack, Tempo, TimeSignature},
    session::{DuplicateKind, WriteSession},
};

/// Exponent of the denominator written without the second value.
const IMPLICIT_DENOMINATOR_EXPONENT: u32 = 2;

/// Renders time signatures and tempo markers in position order. At one position, the time
/// signature comes first, then the anchor, then the tempo value.
#[derive(Debug, Clone, Copy)]
pub struct SyncTrackSerializer<'a> {
    sync_track: &'a SyncTrack,
}

impl<'a> SyncTrackSerializer<'a> {
    /// Creates a serializer of the sync track.
    #[must_use]
    pub const fn new(sync_track: &'a SyncTrack) -> Self {
        Self { sync_track }
    }
}

fn time_signature_line(signature: &TimeSignature) -> String {
    let exponent = signature.exponent();
    if exponent == IMPLICIT_DENOMINATOR_EXPONENT {
        entry_line(signature.position, "TS", signature.numerator)
    } else {
        entry_line(
            signature.position,
            "TS",
            format_args!("{} {exponent}", signature.numerator),
        )
    }
}

fn tempo_lines(tempo: &Tempo, lines: &mut Vec<String>) {
    if let Some(anchor) = tempo.anchor {
        lines.push(entry_line(tempo.position, "A", anchor.as_micros()));
    }
    lines.push(entry_line(tempo.position, "B", fixed_point(tempo.value)));
}

impl SectionSerializer for SyncTrackSerializer<'_> {
    fn header(&self) -> String {
        SYNC_TRACK_HEADER.to_owned()
    }

    fn serialize(&self, session: &WriteSession) -> Result<Vec<String>> {
        let mut tempo = Vec::with_capacity(self.sync_track.tempo.len());
        let mut last_position = None;
        for marker in self
            .sync_track
            .tempo
            .iter()
            .sorted_by_key(|marker| marker.position)
        {
            if session.handle_duplicate(DuplicateKind::TempoMarker, marker.position, || {
                last_position == Some(marker.position)
            })? {
                tempo.push(marker);
            }
            last_position = Some(marker.position);
        }

        let signatures = self
            .sync_track
            .time_signatures
            .iter()
            .sorted_by_key(|signature| signature.position)
            .map(Either::Left);
        let position = |object: &Either<&TimeSignature, &Tempo>| {
            object.either(|signature| signature.position, |marker| marker.position)
        };
        let mut lines = vec![];
        for object in signatures.merge_by(tempo.into_iter().map(Either::Right), |left, right| {
            position(left) <= position(right)
        }) {
            match object {
                Either::Left(signature) => lines.push(time_signature_line(signature)),
                Either::Right(marker) => tempo_lines(marker, &mut lines),
            }
        }
        Ok(lines)
    }
}
