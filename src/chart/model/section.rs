//! Sections not modeled by this crate, kept verbatim so that round trips never drop them.

use thiserror::Error;

use crate::chart::command::header::is_reserved;

/// A header already owned by a section modeled by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("header {header} is reserved for a built-in section")]
pub struct ReservedHeaderError {
    /// The rejected header.
    pub header: String,
}

/// A section kept as its header and raw body lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Header line including its brackets.
    pub header: String,
    /// Trimmed body lines, without the delimiters.
    pub lines: Vec<String>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            lines: Vec::new(),
        }
    }
}

/// Unknown sections in source order, with unique headers not owned by built-in sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionSet {
    sections: Vec<Section>,
}

impl SectionSet {
    /// Adds a section, replacing and returning any section with the same header.
    ///
    /// # Errors
    ///
    /// Returns [`ReservedHeaderError`] if the header belongs to a built-in section.
    pub fn insert(&mut self, section: Section) -> Result<Option<Section>, ReservedHeaderError> {
        if is_reserved(&section.header) {
            return Err(ReservedHeaderError {
                header: section.header,
            });
        }
        match self
            .sections
            .iter_mut()
            .find(|existing| existing.header == section.header)
        {
            Some(existing) => Ok(Some(std::mem::replace(existing, section))),
            None => {
                self.sections.push(section);
                Ok(None)
            }
        }
    }

    /// Returns the section of the header, if any.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.header == header)
    }

    /// Removes the section of the header, returning it.
    pub fn remove(&mut self, header: &str) -> Option<Section> {
        let index = self
            .sections
            .iter()
            .position(|section| section.header == header)?;
        Some(self.sections.remove(index))
    }

    /// Iterates over the sections in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Returns the number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Checks whether the set holds no section.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<'a> IntoIterator for &'a SectionSet {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
