//! Serializer re-emitting stored sections verbatim.

use super::{Result, SectionSerializer};
use crate::chart::{
    command::header::is_reserved,
    model::section::{ReservedHeaderError, Section},
    session::WriteSession,
};

/// Renders a section not modeled by this crate, line by line.
#[derive(Debug, Clone, Copy)]
pub struct UnknownSectionSerializer<'a> {
    section: &'a Section,
}

impl<'a> UnknownSectionSerializer<'a> {
    /// Creates a serializer of the section.
    ///
    /// # Errors
    ///
    /// Returns [`ReservedHeaderError`] if the header belongs to a built-in section, whose content
    /// would be replaced by raw lines.
    pub fn new(section: &'a Section) -> core::result::Result<Self, ReservedHeaderError> {
        if is_reserved(&section.header) {
            return Err(ReservedHeaderError {
                header: section.header.clone(),
            });
        }
        Ok(Self { section })
    }
}

impl SectionSerializer for UnknownSectionSerializer<'_> {
    fn header(&self) -> String {
        self.section.header.clone()
    }

    fn serialize(&self, _session: &WriteSession) -> Result<Vec<String>> {
        Ok(self
            .section
            .lines
            .iter()
            .map(|line| format!("  {line}"))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_headers_are_rejected() {
        let section = Section::new("[Song]");
        assert!(UnknownSectionSerializer::new(&section).is_err());
        let section = Section {
            header: "[ExpertVocals]".into(),
            lines: vec!["0 = E lyric".into()],
        };
        let session = WriteSession::new(Default::default(), None);
        let serializer = UnknownSectionSerializer::new(&section).unwrap();
        assert_eq!(serializer.serialize(&session).unwrap(), vec!["  0 = E lyric"]);
    }
}
