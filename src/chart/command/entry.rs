//! Entries of section bodies.
//!
//! Track-like sections hold [`TrackEntry`] lines (`position = TYPE data`) and the metadata section
//! holds [`KeyValueEntry`] lines (`Key = value`).

use std::{fmt::Display, str::FromStr};

use crate::chart::parse::{ParseError, Result};

/// Splits the next whitespace separated token from the text, returning it with the remainder.
fn next_token(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    Some(text.split_once(char::is_whitespace).unwrap_or((text, "")))
}

/// A `position = TYPE data` entry of a track, sync track or events section.
///
/// The `=` separator is optional on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackEntry<'a> {
    /// Position of the object in ticks.
    pub position: u32,
    /// Type code such as `N`, `E`, `S`, `B`, `A` or `TS`.
    pub kind: &'a str,
    /// Everything after the type code, trimmed.
    pub data: &'a str,
}

impl<'a> TrackEntry<'a> {
    /// Splits a trimmed body line into an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidEntry`] if the line does not follow the entry grammar, or
    /// [`ParseError::ExpectedValue`] if the position is not an unsigned integer.
    pub fn parse(line: &'a str) -> Result<Self> {
        let invalid = || ParseError::InvalidEntry {
            expected: "`position = TYPE data`",
            line: line.to_owned(),
        };
        let (position, rest) = next_token(line).ok_or_else(invalid)?;
        let position = parse_value(position, "position")?;
        let (mut kind, mut rest) = next_token(rest).ok_or_else(invalid)?;
        if kind == "=" {
            (kind, rest) = next_token(rest).ok_or_else(invalid)?;
        }
        Ok(Self {
            position,
            kind,
            data: rest.trim(),
        })
    }

    /// Returns the whitespace separated values of the data.
    pub fn values(&self) -> std::str::SplitWhitespace<'a> {
        self.data.split_whitespace()
    }

    /// Returns the data with one pair of surrounding quotes removed, as written for event text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        unquote(self.data)
    }
}

/// A `Key = value` entry of the metadata section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyValueEntry<'a> {
    /// Key before the `=`.
    pub key: &'a str,
    /// Value after the `=`, trimmed but still quoted when written quoted.
    pub value: &'a str,
}

impl<'a> KeyValueEntry<'a> {
    /// Splits a trimmed body line into a key and a value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidEntry`] if the line has no `=` or an empty key.
    pub fn parse(line: &'a str) -> Result<Self> {
        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok(Self {
                key: key.trim(),
                value: value.trim(),
            }),
            _ => Err(ParseError::InvalidEntry {
                expected: "`Key = value`",
                line: line.to_owned(),
            }),
        }
    }
}

/// Removes one pair of surrounding double quotes, if present.
#[must_use]
pub fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}

/// Parses a value of an entry, reporting what was expected on failure.
///
/// # Errors
///
/// Returns [`ParseError::ExpectedValue`] if `raw` cannot be parsed as `T`.
pub fn parse_value<T: FromStr>(raw: &str, what: &'static str) -> Result<T> {
    raw.parse().map_err(|_| ParseError::ExpectedValue {
        what,
        found: raw.to_owned(),
    })
}

/// Parses the next value out of an iterator of entry values.
///
/// # Errors
///
/// Returns [`ParseError::ExpectedValue`] if the value is missing or cannot be parsed as `T`.
pub fn next_value<'a, T: FromStr>(
    values: &mut impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<T> {
    parse_value(values.next().unwrap_or_default(), what)
}

/// Formats a `position = TYPE data` line as written in track-like sections.
#[must_use]
pub fn entry_line(position: u32, kind: &str, data: impl Display) -> String {
    format!("  {position} = {kind} {data}")
}

/// Formats a `Key = value` line as written in the metadata section.
#[must_use]
pub fn key_value_line(key: &str, value: impl Display) -> String {
    format!("  {key} = {value}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn track_entry_with_and_without_separator() {
        let with = TrackEntry::parse("768 = E \"section Intro\"").unwrap();
        assert_eq!(
            with,
            TrackEntry {
                position: 768,
                kind: "E",
                data: "\"section Intro\"",
            }
        );
        assert_eq!(with.text(), "section Intro");

        let without = TrackEntry::parse("0 B 120000").unwrap();
        assert_eq!(without.kind, "B");
        assert_eq!(without.data, "120000");

        let note = TrackEntry::parse("192 = N 2 0").unwrap();
        assert_eq!(note.values().collect::<Vec<_>>(), vec!["2", "0"]);
    }

    #[test]
    fn track_entry_errors() {
        assert!(matches!(
            TrackEntry::parse("abc = N 0 0"),
            Err(ParseError::ExpectedValue {
                what: "position",
                ..
            })
        ));
        assert!(matches!(
            TrackEntry::parse("12 ="),
            Err(ParseError::InvalidEntry { .. })
        ));
        assert!(matches!(
            TrackEntry::parse("12"),
            Err(ParseError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn key_value_entry() {
        let entry = KeyValueEntry::parse("Name = \"Song = Title\"").unwrap();
        assert_eq!(entry.key, "Name");
        assert_eq!(entry.value, "\"Song = Title\"");
        assert_eq!(unquote(entry.value), "Song = Title");
        assert!(KeyValueEntry::parse("Resolution 192").is_err());
        assert!(KeyValueEntry::parse(" = 192").is_err());
    }

    #[test]
    fn lines() {
        assert_eq!(entry_line(0, "B", 120000), "  0 = B 120000");
        assert_eq!(key_value_line("Resolution", 192), "  Resolution = 192");
    }
}
