//! Contents of `[Song]`.

use std::collections::BTreeMap;

/// Keys of the audio stream entries, in the order they are written.
pub const STREAM_KEYS: [&str; 12] = [
    "MusicStream",
    "GuitarStream",
    "BassStream",
    "RhythmStream",
    "KeysStream",
    "DrumStream",
    "Drum2Stream",
    "Drum3Stream",
    "Drum4Stream",
    "VocalStream",
    "CrowdStream",
    "PreviewStream",
];

/// A metadata entry this crate does not model, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnidentifiedEntry {
    /// Key before the `=`.
    pub key: String,
    /// Value after the `=`, including any quotes.
    pub value: String,
}

/// Song information.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// `Name`.
    pub title: Option<String>,
    /// `Artist`.
    pub artist: Option<String>,
    /// `Charter`.
    pub charter: Option<String>,
    /// `Album`.
    pub album: Option<String>,
    /// `Year`.
    pub year: Option<u16>,
    /// `Offset`, the audio offset in seconds.
    pub offset: Option<f64>,
    /// `Resolution`, ticks per quarter note.
    pub resolution: Option<u16>,
    /// `Difficulty`, the intensity rating.
    pub difficulty: Option<i8>,
    /// `PreviewStart`, in seconds.
    pub preview_start: Option<f64>,
    /// `PreviewEnd`, in seconds.
    pub preview_end: Option<f64>,
    /// `Genre`.
    pub genre: Option<String>,
    /// `MediaType`.
    pub media_type: Option<String>,
    /// Audio file names keyed by one of [`STREAM_KEYS`].
    pub streams: BTreeMap<String, String>,
    /// Entries not modeled above, in source order.
    pub unidentified: Vec<UnidentifiedEntry>,
}

impl Metadata {
    /// Resolution assumed when the metadata does not declare one.
    pub const DEFAULT_RESOLUTION: u16 = 192;

    /// Returns the declared resolution or [`Self::DEFAULT_RESOLUTION`].
    #[must_use]
    pub fn resolution_or_default(&self) -> u16 {
        self.resolution.unwrap_or(Self::DEFAULT_RESOLUTION)
    }
}
