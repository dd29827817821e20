//! The section writer and in-place patcher.
//!
//! A blank output receives every replaced section back to back. An existing output is patched in
//! one forward pass: lines are copied verbatim until a header with a replacement shows up, the
//! replacement is emitted in place of the original section, and copying resumes after the original
//! section's closing line. Sections without replacement survive byte for byte.

use std::{
    fs::File,
    io::{self, BufRead, BufWriter, Cursor, Read, Seek, SeekFrom, Write},
};

use tracing::debug;

use super::{
    command::{SECTION_END, SECTION_START, is_header, is_section_end, is_section_start},
    config::LineEnding,
    unparse::{SectionReplacement, SerializedSection},
};

/// A destination that can be cut to a length, so that rewriting a shorter content in place leaves
/// no trailing bytes of the previous one.
pub trait Truncate {
    /// Cuts the destination to `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying destination.
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl Truncate for File {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

impl Truncate for Cursor<Vec<u8>> {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len).map_err(io::Error::other)?;
        self.get_mut().truncate(len);
        Ok(())
    }
}

impl<T: Truncate + ?Sized> Truncate for &mut T {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        (**self).truncate(len)
    }
}

/// Counts the bytes going through a writer.
struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn write_section(
    out: &mut impl Write,
    section: &SerializedSection,
    line_ending: LineEnding,
) -> io::Result<()> {
    let eol = line_ending.as_str();
    write!(out, "{}{eol}{SECTION_START}{eol}", section.header)?;
    for line in &section.lines {
        write!(out, "{line}{eol}")?;
    }
    write!(out, "{SECTION_END}{eol}")
}

/// Where the patcher stands in the existing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatchState {
    SeekHeader,
    AwaitBodyStart { skip: bool },
    InBody { skip: bool },
}

impl PatchState {
    /// Checks whether the lines of this state belong to a section being replaced or removed.
    const fn skips(self) -> bool {
        matches!(
            self,
            Self::AwaitBodyStart { skip: true } | Self::InBody { skip: true }
        )
    }
}

/// Writes the sections of the replacements to a blank output, in order. Removals are skipped.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns the error of the destination.
pub fn write_sections<W: Write>(
    dest: W,
    replacements: &[SectionReplacement],
    line_ending: LineEnding,
) -> io::Result<u64> {
    let mut out = CountingWriter {
        inner: dest,
        written: 0,
    };
    for replacement in replacements {
        if let SectionReplacement::Replace(section) = replacement {
            write_section(&mut out, section, line_ending)?;
        }
    }
    out.flush()?;
    Ok(out.written)
}

/// Copies the existing content to the destination, applying the replacements.
///
/// - A replacement is emitted at the first section of its header, later sections of the same
///   header are dropped.
/// - Removals drop the sections of their header.
/// - Replacements whose header was never found are appended at the end.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns the error of the existing content or of the destination.
pub fn patch_sections<R: BufRead, W: Write>(
    mut existing: R,
    dest: W,
    replacements: &[SectionReplacement],
    line_ending: LineEnding,
) -> io::Result<u64> {
    let mut out = CountingWriter {
        inner: dest,
        written: 0,
    };
    let mut pending: Vec<Option<&SectionReplacement>> = replacements.iter().map(Some).collect();
    let mut state = PatchState::SeekHeader;
    let mut ends_with_newline = true;
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if existing.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&raw);
        let line = text.trim_start_matches('\u{feff}').trim();

        // Headers only count outside of section bodies.
        let next = match state {
            PatchState::SeekHeader if is_header(line) => {
                let skip = match replacements
                    .iter()
                    .position(|replacement| replacement.header() == line)
                {
                    Some(index) => {
                        match pending.get_mut(index).and_then(Option::take) {
                            Some(SectionReplacement::Replace(section)) => {
                                debug!(header = line, "replacing section");
                                write_section(&mut out, section, line_ending)?;
                                ends_with_newline = true;
                            }
                            Some(SectionReplacement::Remove(_)) => {
                                debug!(header = line, "removing section");
                            }
                            None => debug!(header = line, "dropping repeated section"),
                        }
                        true
                    }
                    None => false,
                };
                PatchState::AwaitBodyStart { skip }
            }
            PatchState::SeekHeader => PatchState::SeekHeader,
            PatchState::AwaitBodyStart { skip } if is_section_start(line) => {
                PatchState::InBody { skip }
            }
            PatchState::InBody { .. } if is_section_end(line) => PatchState::SeekHeader,
            other => other,
        };
        let skipped = state.skips() || next.skips();
        state = next;
        if !skipped {
            out.write_all(&raw)?;
            ends_with_newline = raw.ends_with(b"\n");
        }
    }

    for replacement in pending.into_iter().flatten() {
        if let SectionReplacement::Replace(section) = replacement {
            debug!(header = section.header.as_str(), "appending section");
            if !ends_with_newline {
                out.write_all(line_ending.as_str().as_bytes())?;
                ends_with_newline = true;
            }
            write_section(&mut out, section, line_ending)?;
        }
    }
    out.flush()?;
    Ok(out.written)
}

/// Patches the content of a destination that is also the source of the existing content, then
/// cuts it to the written length.
///
/// The existing content is buffered before the destination is rewritten from its start.
///
/// # Errors
///
/// Returns the error of the destination.
pub fn patch_in_place<D: Read + Write + Seek + Truncate>(
    dest: &mut D,
    replacements: &[SectionReplacement],
    line_ending: LineEnding,
) -> io::Result<u64> {
    dest.seek(SeekFrom::Start(0))?;
    let mut existing = Vec::new();
    dest.read_to_end(&mut existing)?;
    dest.seek(SeekFrom::Start(0))?;

    let mut out = BufWriter::new(&mut *dest);
    let written = patch_sections(existing.as_slice(), &mut out, replacements, line_ending)?;
    out.flush()?;
    drop(out);
    dest.truncate(written)?;
    Ok(written)
}
