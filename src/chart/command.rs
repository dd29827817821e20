//! Definitions of the `.chart` text grammar.
//!
//! - [`header`] maps section headers to the section kinds modeled by this crate.
//! - [`entry`] splits body lines into `position = TYPE data` and `Key = value` entries.
//! - [`mixin`] attaches source locations to lines and errors.
//! - [`note_index`] holds the note index conventions of the format.

pub mod entry;
pub mod header;
pub mod mixin;

use num::ToPrimitive;

/// The line opening a section body.
pub const SECTION_START: &str = "{";
/// The line closing a section body.
pub const SECTION_END: &str = "}";

/// Checks whether the trimmed line opens a section body.
#[must_use]
pub fn is_section_start(line: &str) -> bool {
    line == SECTION_START
}

/// Checks whether the trimmed line closes a section body.
#[must_use]
pub fn is_section_end(line: &str) -> bool {
    line == SECTION_END
}

/// Checks whether the trimmed line is a section header such as `[SyncTrack]`.
#[must_use]
pub fn is_header(line: &str) -> bool {
    line.starts_with('[')
}

/// Encodes a decimal value as the fixed-point integer used by the format (thousandths, truncated).
///
/// A tiny bias is added before truncation so that values decoded by [`from_fixed_point`] encode
/// back to the same integer.
#[must_use]
pub fn fixed_point(value: f64) -> i64 {
    let scaled = value * 1000.0;
    let biased = if scaled.is_sign_negative() {
        scaled - 1e-6
    } else {
        scaled + 1e-6
    };
    biased.trunc().to_i64().unwrap_or(0)
}

/// Decodes a fixed-point integer written by [`fixed_point`].
#[must_use]
pub fn from_fixed_point(raw: i64) -> f64 {
    raw as f64 / 1000.0
}

/// Note indices of `N` entries, per instrument family.
///
/// The indices above the lane range are format-version sensitive. They are kept together here
/// so that a newer revision of the format only has to update this table.
pub mod note_index {
    /// Five-fret lanes Green to Orange start at this index.
    pub const STANDARD_FIRST_FRET: u8 = 0;
    /// Inverts the natural HOPO state of the chord.
    pub const HOPO_INVERT: u8 = 5;
    /// Marks the chord as a tap chord.
    pub const TAP: u8 = 6;
    /// Open note of five-fret and six-fret instruments.
    pub const OPEN: u8 = 7;
    /// Third black fret of six-fret instruments.
    pub const GHL_BLACK3: u8 = 8;
    /// Kick only played with a double pedal.
    pub const DRUMS_DOUBLE_KICK: u8 = 32;
    /// Accent flag of a pad is written at `pad index + DRUMS_ACCENT_OFFSET`.
    pub const DRUMS_ACCENT_OFFSET: u8 = 33;
    /// Ghost flag of a pad is written at `pad index + DRUMS_GHOST_OFFSET`.
    pub const DRUMS_GHOST_OFFSET: u8 = 39;
    /// Cymbal flag of a pad is written at `pad index + DRUMS_CYMBAL_OFFSET`.
    pub const DRUMS_CYMBAL_OFFSET: u8 = 64;
    /// Flam flag of a drums chord.
    pub const DRUMS_FLAM: u8 = 109;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_point_truncates_thousandths() {
        assert_eq!(fixed_point(120.0), 120000);
        assert_eq!(fixed_point(123.4567), 123456);
        assert_eq!(fixed_point(from_fixed_point(123456)), 123456);
        assert_eq!(fixed_point(from_fixed_point(97531)), 97531);
    }

    #[test]
    fn delimiters() {
        assert!(is_section_start("{"));
        assert!(is_section_end("}"));
        assert!(!is_section_end("} "));
        assert!(is_header("[Song]"));
        assert!(!is_header("  0 = B 1"));
    }
}
