//! Tempo markers, anchors and time signatures of `[SyncTrack]`.

use std::time::Duration;

use super::TrackObject;

/// A tempo marker, optionally anchored to a fixed time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo {
    /// Position in ticks.
    pub position: u32,
    /// Beats per minute.
    pub value: f64,
    /// Time of the marker since the start of the song, overriding tick based timing.
    pub anchor: Option<Duration>,
}

impl Tempo {
    /// Creates a tempo marker without anchor.
    #[must_use]
    pub const fn new(position: u32, value: f64) -> Self {
        Self {
            position,
            value,
            anchor: None,
        }
    }

    /// Attaches an anchor.
    #[must_use]
    pub const fn with_anchor(mut self, anchor: Duration) -> Self {
        self.anchor = Some(anchor);
        self
    }
}

impl TrackObject for Tempo {
    fn position(&self) -> u32 {
        self.position
    }
}

/// A time signature, written as `TS numerator [log2 denominator]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Position in ticks.
    pub position: u32,
    /// Beats per measure.
    pub numerator: u8,
    /// Note value of a beat, a power of two.
    pub denominator: u8,
}

impl TimeSignature {
    /// Denominator assumed when omitted.
    pub const DEFAULT_DENOMINATOR: u8 = 4;

    /// Creates a new time signature.
    #[must_use]
    pub const fn new(position: u32, numerator: u8, denominator: u8) -> Self {
        Self {
            position,
            numerator,
            denominator,
        }
    }

    /// Builds the time signature from the written exponent of the denominator.
    ///
    /// Returns `None` if the denominator does not fit.
    #[must_use]
    pub fn from_exponent(position: u32, numerator: u8, exponent: u8) -> Option<Self> {
        1u8.checked_shl(exponent.into())
            .map(|denominator| Self::new(position, numerator, denominator))
    }

    /// Returns the exponent of the denominator as written.
    #[must_use]
    pub const fn exponent(&self) -> u32 {
        self.denominator.trailing_zeros()
    }
}

impl TrackObject for TimeSignature {
    fn position(&self) -> u32 {
        self.position
    }
}

/// Contents of `[SyncTrack]`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncTrack {
    /// Tempo markers in position order, at most one per position.
    pub tempo: Vec<Tempo>,
    /// Time signatures in position order.
    pub time_signatures: Vec<TimeSignature>,
}

impl SyncTrack {
    /// Checks whether the sync track holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tempo.is_empty() && self.time_signatures.is_empty()
    }

    /// Returns the tempo marker in effect at the position.
    #[must_use]
    pub fn tempo_at(&self, position: u32) -> Option<&Tempo> {
        let index = self.tempo.partition_point(|tempo| tempo.position <= position);
        index.checked_sub(1).and_then(|index| self.tempo.get(index))
    }

    /// Returns the time signature in effect at the position.
    #[must_use]
    pub fn time_signature_at(&self, position: u32) -> Option<&TimeSignature> {
        self.time_signatures
            .iter()
            .take_while(|signature| signature.position <= position)
            .last()
    }
}
