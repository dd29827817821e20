//! Parser of `[Song]`.

use std::collections::HashSet;

use super::{ParsedSection, Result, SectionParser};
use crate::chart::{
    command::entry::{KeyValueEntry, parse_value, unquote},
    model::metadata::{Metadata, STREAM_KEYS, UnidentifiedEntry},
    session::ReadSession,
};

/// Parses `[Song]`. Unknown keys are kept as [`UnidentifiedEntry`] values.
#[derive(Debug)]
pub struct MetadataParser {
    session: ReadSession,
    metadata: Metadata,
    seen: HashSet<String>,
}

impl MetadataParser {
    /// Creates a parser.
    #[must_use]
    pub fn new(session: ReadSession) -> Self {
        Self {
            session,
            metadata: Metadata::default(),
            seen: HashSet::new(),
        }
    }
}

fn text(value: &str) -> Option<String> {
    Some(unquote(value).to_owned())
}

impl SectionParser for MetadataParser {
    fn handle_line(&mut self, line: &str) -> Result<()> {
        let KeyValueEntry { key, value } = KeyValueEntry::parse(line)?;
        let seen = !self.seen.insert(key.to_owned());
        if !self.session.handle_duplicate_key(key, seen)? {
            return Ok(());
        }

        let metadata = &mut self.metadata;
        let unquoted = unquote(value);
        match key {
            "Name" => metadata.title = text(value),
            "Artist" => metadata.artist = text(value),
            "Charter" => metadata.charter = text(value),
            "Album" => metadata.album = text(value),
            "Genre" => metadata.genre = text(value),
            "MediaType" => metadata.media_type = text(value),
            "Year" => {
                let year = unquoted.trim_start_matches([',', ' ']);
                metadata.year = Some(parse_value(year, "year")?);
            }
            "Offset" => metadata.offset = Some(parse_value(unquoted, "offset")?),
            "Resolution" => metadata.resolution = Some(parse_value(unquoted, "resolution")?),
            "Difficulty" => metadata.difficulty = Some(parse_value(unquoted, "difficulty")?),
            "PreviewStart" => {
                metadata.preview_start = Some(parse_value(unquoted, "preview start")?);
            }
            "PreviewEnd" => metadata.preview_end = Some(parse_value(unquoted, "preview end")?),
            stream if STREAM_KEYS.contains(&stream) => {
                metadata
                    .streams
                    .insert(stream.to_owned(), unquoted.to_owned());
            }
            _ => {
                let entry = UnidentifiedEntry {
                    key: key.to_owned(),
                    value: value.to_owned(),
                };
                match metadata
                    .unidentified
                    .iter_mut()
                    .find(|existing| existing.key == key)
                {
                    Some(existing) => *existing = entry,
                    None => metadata.unidentified.push(entry),
                }
            }
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<ParsedSection> {
        Ok(ParsedSection::Metadata(self.metadata))
    }
}
