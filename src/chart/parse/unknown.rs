//! Parser keeping sections not modeled by this crate verbatim.

use super::{ParsedSection, Result, SectionParser};
use crate::chart::model::section::Section;

/// Collects the body lines of an unknown section.
#[derive(Debug)]
pub struct UnknownSectionParser {
    section: Section,
}

impl UnknownSectionParser {
    /// Creates a parser of the header.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            section: Section::new(header),
        }
    }
}

impl SectionParser for UnknownSectionParser {
    fn handle_line(&mut self, line: &str) -> Result<()> {
        self.section.lines.push(line.to_owned());
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<ParsedSection> {
        Ok(ParsedSection::Unknown(self.section))
    }
}
