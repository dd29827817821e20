//! Decision functions shared by every parser and serializer.
//!
//! A session holds the configuration of one operation. Parsers and serializers ask it how to
//! resolve duplicates, overlapping phrases, snapped notes and anchors without tempo, instead of
//! matching on policies themselves.

use std::{fmt, time::Duration};

use tracing::trace;

use super::{
    config::{
        DuplicatePolicy, OverlappingPhrasePolicy, ReadConfig, SnappedNotesPolicy,
        TempolessAnchorPolicy, WriteConfig,
    },
    model::{LongTrackObject, metadata::Metadata, sync_track::Tempo, track::Phrase},
    parse::{ParseError, Result},
    unparse::WriteError,
};

/// The kind of object found twice at one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum DuplicateKind {
    /// A note on an already used lane.
    Note,
    /// A chord modifier already set.
    ChordModifier,
    /// A whole chord, on write.
    Chord,
    /// A tempo value.
    TempoMarker,
    /// An anchor.
    Anchor,
    /// A time signature.
    TimeSignature,
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Note => "note",
            Self::ChordModifier => "chord modifier",
            Self::Chord => "chord",
            Self::TempoMarker => "tempo marker",
            Self::Anchor => "anchor",
            Self::TimeSignature => "time signature",
        })
    }
}

impl DuplicatePolicy {
    /// Decides whether an object is included. Returns `None` when the object must be rejected.
    fn include(self, is_duplicate: impl FnOnce() -> bool) -> Option<bool> {
        match self {
            Self::Throw => (!is_duplicate()).then_some(true),
            Self::IncludeFirst => Some(!is_duplicate()),
            Self::IncludeAll => Some(true),
        }
    }
}

/// Resolves overlaps of adjacent phrases sorted by position.
///
/// Returns the position of the first overlapping phrase on [`OverlappingPhrasePolicy::Throw`].
fn resolve_overlaps(
    policy: OverlappingPhrasePolicy,
    phrases: &mut [Phrase],
) -> core::result::Result<(), u32> {
    for index in 1..phrases.len() {
        let Some([previous, current]) = phrases.get_mut(index - 1..=index) else {
            continue;
        };
        if previous.end_position() <= current.position {
            continue;
        }
        match policy {
            OverlappingPhrasePolicy::Throw => return Err(current.position),
            OverlappingPhrasePolicy::Cut => {
                trace!(
                    position = previous.position,
                    next = current.position,
                    "cutting overlapping phrase"
                );
                previous.set_length(current.position - previous.position);
            }
        }
    }
    Ok(())
}

/// Configuration and decisions of one read operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReadSession {
    /// The active configuration.
    pub config: ReadConfig,
}

impl ReadSession {
    /// Creates a session of the configuration.
    #[must_use]
    pub const fn new(config: ReadConfig) -> Self {
        Self { config }
    }

    /// Decides whether an object of the kind is added at the position.
    ///
    /// `is_duplicate` is only evaluated when the policy needs it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Duplicate`] if the object is a duplicate and the policy is
    /// [`DuplicatePolicy::Throw`].
    pub fn handle_duplicate(
        &self,
        kind: DuplicateKind,
        position: u32,
        is_duplicate: impl FnOnce() -> bool,
    ) -> Result<bool> {
        let include = self
            .config
            .duplicate_policy
            .include(is_duplicate)
            .ok_or(ParseError::Duplicate { kind, position })?;
        if !include {
            trace!(%kind, position, "skipping duplicate");
        }
        Ok(include)
    }

    /// Decides whether a metadata entry of the key is applied.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::DuplicateKey`] if the key was seen and the policy is
    /// [`DuplicatePolicy::Throw`].
    pub fn handle_duplicate_key(&self, key: &str, seen: bool) -> Result<bool> {
        self.config
            .duplicate_policy
            .include(|| seen)
            .ok_or_else(|| ParseError::DuplicateKey {
                key: key.to_owned(),
            })
    }

    /// Decides whether a note at `position` joins the chord at `origin`.
    ///
    /// Only called for notes within the snapping distance.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::SnappedNote`] on [`SnappedNotesPolicy::Throw`].
    pub fn handle_snap(&self, origin: u32, position: u32) -> Result<bool> {
        match self.config.snapped_notes_policy {
            SnappedNotesPolicy::Throw => Err(ParseError::SnappedNote { origin, position }),
            SnappedNotesPolicy::Snap => {
                trace!(origin, position, "snapping note");
                Ok(true)
            }
            SnappedNotesPolicy::Ignore => Ok(false),
        }
    }

    /// Checks whether a position is close enough to a chord to be a snapped note.
    #[must_use]
    pub const fn is_snapped(&self, origin: u32, position: u32) -> bool {
        self.config.snap_distance > 0
            && position != origin
            && position.abs_diff(origin) <= self.config.snap_distance
    }

    /// Resolves an anchor that never received a tempo value.
    ///
    /// Returns the tempo marker to keep, if any. A created marker takes the value of `previous`,
    /// or zero without one.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::TempolessAnchor`] on [`TempolessAnchorPolicy::Throw`].
    pub fn handle_tempoless_anchor(
        &self,
        position: u32,
        anchor: Duration,
        previous: Option<&Tempo>,
    ) -> Result<Option<Tempo>> {
        match self.config.tempoless_anchor_policy {
            TempolessAnchorPolicy::Throw => Err(ParseError::TempolessAnchor { position }),
            TempolessAnchorPolicy::Ignore => {
                trace!(position, "discarding tempoless anchor");
                Ok(None)
            }
            TempolessAnchorPolicy::Create => {
                let value = previous.map_or(0.0, |tempo| tempo.value);
                Ok(Some(Tempo::new(position, value).with_anchor(anchor)))
            }
        }
    }

    /// Applies the overlapping phrase policy to phrases sorted by position.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::OverlappingPhrases`] on [`OverlappingPhrasePolicy::Throw`].
    pub fn handle_overlaps(&self, phrases: &mut [Phrase]) -> Result<()> {
        resolve_overlaps(self.config.overlapping_phrase_policy, phrases)
            .map_err(|position| ParseError::OverlappingPhrases { position })
    }
}

/// Configuration and decisions of one write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WriteSession {
    /// The active configuration.
    pub config: WriteConfig,
    /// Natural HOPO threshold in ticks.
    pub hopo_threshold: u32,
}

impl WriteSession {
    /// Creates a session of the configuration, deriving the HOPO threshold from the resolution of
    /// the song, or the default resolution without one.
    #[must_use]
    pub fn new(config: WriteConfig, resolution: Option<u16>) -> Self {
        let resolution = resolution.unwrap_or(Metadata::DEFAULT_RESOLUTION);
        Self {
            config,
            hopo_threshold: config.hopo_threshold_for(resolution),
        }
    }

    /// Decides whether an object of the kind is written.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Duplicate`] if the object is a duplicate and the policy is
    /// [`DuplicatePolicy::Throw`].
    pub fn handle_duplicate(
        &self,
        kind: DuplicateKind,
        position: u32,
        is_duplicate: impl FnOnce() -> bool,
    ) -> core::result::Result<bool, WriteError> {
        self.config
            .duplicate_policy
            .include(is_duplicate)
            .ok_or(WriteError::Duplicate { kind, position })
    }

    /// Applies the overlapping phrase policy to phrases sorted by position.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::OverlappingPhrases`] on [`OverlappingPhrasePolicy::Throw`].
    pub fn handle_overlaps(&self, phrases: &mut [Phrase]) -> core::result::Result<(), WriteError> {
        resolve_overlaps(self.config.overlapping_phrase_policy, phrases)
            .map_err(|position| WriteError::OverlappingPhrases { position })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chart::model::track::PhraseKind;

    fn session(policy: DuplicatePolicy) -> ReadSession {
        ReadSession::new(ReadConfig::default().with_duplicate_policy(policy))
    }

    #[test]
    fn duplicate_decisions() {
        let throw = session(DuplicatePolicy::Throw);
        assert_eq!(throw.handle_duplicate(DuplicateKind::Note, 0, || false), Ok(true));
        assert_eq!(
            throw.handle_duplicate(DuplicateKind::Note, 5, || true),
            Err(ParseError::Duplicate {
                kind: DuplicateKind::Note,
                position: 5
            })
        );

        let first = session(DuplicatePolicy::IncludeFirst);
        assert_eq!(first.handle_duplicate(DuplicateKind::Anchor, 0, || true), Ok(false));
        assert_eq!(first.handle_duplicate(DuplicateKind::Anchor, 0, || false), Ok(true));

        let all = session(DuplicatePolicy::IncludeAll);
        assert_eq!(
            all.handle_duplicate(DuplicateKind::TempoMarker, 0, || unreachable!()),
            Ok(true)
        );
    }

    #[test]
    fn overlaps_are_cut_or_rejected() {
        let mut phrases = vec![
            Phrase::new(0, 100, PhraseKind::StarPowerGain),
            Phrase::new(50, 100, PhraseKind::StarPowerGain),
            Phrase::new(150, 10, PhraseKind::StarPowerGain),
        ];
        let throw = ReadSession::default();
        assert_eq!(
            throw.handle_overlaps(&mut phrases.clone()),
            Err(ParseError::OverlappingPhrases { position: 50 })
        );

        let cut = ReadSession::new(
            ReadConfig::default().with_overlapping_phrase_policy(OverlappingPhrasePolicy::Cut),
        );
        cut.handle_overlaps(&mut phrases).unwrap();
        assert_eq!(
            phrases.iter().map(|phrase| phrase.length).collect::<Vec<_>>(),
            vec![50, 100, 10]
        );
    }

    #[test]
    fn snapping() {
        let session = ReadSession::new(
            ReadConfig::default().with_snapped_notes_policy(SnappedNotesPolicy::Snap, 2),
        );
        assert!(session.is_snapped(100, 102));
        assert!(!session.is_snapped(100, 100));
        assert!(!session.is_snapped(100, 103));
        assert_eq!(session.handle_snap(100, 102), Ok(true));
        assert!(!ReadSession::default().is_snapped(100, 101));
    }

    #[test]
    fn tempoless_anchor_creation() {
        let session = ReadSession::new(
            ReadConfig::default().with_tempoless_anchor_policy(TempolessAnchorPolicy::Create),
        );
        let previous = Tempo::new(0, 140.0);
        let created = session
            .handle_tempoless_anchor(768, Duration::from_secs(1), Some(&previous))
            .unwrap()
            .unwrap();
        assert_eq!(created.value, 140.0);
        assert_eq!(created.anchor, Some(Duration::from_secs(1)));
        assert_eq!(
            ReadSession::default().handle_tempoless_anchor(768, Duration::ZERO, None),
            Err(ParseError::TempolessAnchor { position: 768 })
        );
    }
}
