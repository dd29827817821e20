//! Serializer of `[Song]`.

use std::fmt::Display;

use super::{Result, SectionSerializer};
use crate::chart::{
    command::{entry::key_value_line, header::METADATA_HEADER},
    model::metadata::Metadata,
    session::WriteSession,
};

/// Renders metadata: known keys first, then audio streams, then unidentified entries as read.
#[derive(Debug, Clone, Copy)]
pub struct MetadataSerializer<'a> {
    metadata: &'a Metadata,
}

impl<'a> MetadataSerializer<'a> {
    /// Creates a serializer of the metadata.
    #[must_use]
    pub const fn new(metadata: &'a Metadata) -> Self {
        Self { metadata }
    }
}

fn quoted(lines: &mut Vec<String>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        lines.push(key_value_line(key, format_args!("\"{value}\"")));
    }
}

fn plain(lines: &mut Vec<String>, key: &str, value: Option<impl Display>) {
    if let Some(value) = value {
        lines.push(key_value_line(key, value));
    }
}

impl SectionSerializer for MetadataSerializer<'_> {
    fn header(&self) -> String {
        METADATA_HEADER.to_owned()
    }

    fn serialize(&self, _session: &WriteSession) -> Result<Vec<String>> {
        let metadata = self.metadata;
        let mut lines = vec![];
        quoted(&mut lines, "Name", metadata.title.as_deref());
        quoted(&mut lines, "Artist", metadata.artist.as_deref());
        quoted(&mut lines, "Charter", metadata.charter.as_deref());
        quoted(&mut lines, "Album", metadata.album.as_deref());
        if let Some(year) = metadata.year {
            lines.push(key_value_line("Year", format_args!("\", {year}\"")));
        }
        plain(&mut lines, "Offset", metadata.offset);
        plain(&mut lines, "Resolution", metadata.resolution);
        plain(&mut lines, "Difficulty", metadata.difficulty);
        plain(&mut lines, "PreviewStart", metadata.preview_start);
        plain(&mut lines, "PreviewEnd", metadata.preview_end);
        quoted(&mut lines, "Genre", metadata.genre.as_deref());
        quoted(&mut lines, "MediaType", metadata.media_type.as_deref());
        for (key, value) in &metadata.streams {
            quoted(&mut lines, key, Some(value));
        }
        lines.extend(
            metadata
                .unidentified
                .iter()
                .map(|entry| key_value_line(&entry.key, &entry.value)),
        );
        Ok(lines)
    }
}
