//! Fancy diagnostics support using `ariadne`.
//!
//! Read errors carry the line location of their section header and, when known, of the offending
//! line. This module converts them to `ariadne::Report` pointing at those byte spans, and lets
//! ariadne handle the row/column calculations for display purposes.
//!
//! # Usage Example
//!
//! ```rust
//! use chart_rs::{
//!     chart::{config::ReadConfig, read_song_from_str},
//!     diagnostics::emit_read_error,
//! };
//!
//! let source = "[SyncTrack]\n{\n  0 = B fast\n}\n";
//! if let Err(err) = read_song_from_str(source, &ReadConfig::default()) {
//!     emit_read_error("notes.chart", source, &err);
//! }
//! ```

use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::chart::ReadError;

/// Simple source container that holds the filename and source text.
/// Ariadne will automatically handle row/column calculations from byte offsets.
///
/// # Usage Example
///
/// ```rust
/// use chart_rs::diagnostics::SimpleSource;
///
/// let source_text = "[Song]\n{\n  Resolution = 192\n}\n";
/// let source = SimpleSource::new("notes.chart", source_text);
///
/// assert_eq!(source.text(), source_text);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    ///
    /// # Parameters
    /// * `name` - Name of the source file
    /// * `text` - Complete text content of the source file
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting located errors to `ariadne::Report`.
pub trait ToAriadne {
    /// Convert error to ariadne Report.
    ///
    /// # Parameters
    /// * `src` - Source file container (used for filename, ariadne handles row/column calculation)
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)>;
}

/// Helper to build a styled ariadne `Report` consistently.
#[must_use]
pub fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: Range<usize>,
    title: &str,
    label_message: impl ToString,
    color: Color,
) -> Report<'a, (String, Range<usize>)> {
    let filename = src.name().to_string();
    Report::build(kind, (filename.clone(), range.clone()))
        .with_message(title)
        .with_label(
            Label::new((filename, range))
                .with_message(label_message.to_string())
                .with_color(color),
        )
        .finish()
}

impl ToAriadne for ReadError {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        match self {
            Self::Io(err) => build_report(
                src,
                ReportKind::Error,
                0..0,
                "read: failed to read the chart",
                err,
                Color::Red,
            ),
            Self::UnknownSection { header } => build_report(
                src,
                ReportKind::Error,
                header.span(),
                "read: unknown section",
                "this header is not a known section",
                Color::Red,
            ),
            Self::EarlySectionEnd { header } => build_report(
                src,
                ReportKind::Error,
                header.span(),
                "read: section is not closed",
                "the source ended before the closing `}` of this section",
                Color::Red,
            ),
            Self::Section {
                header,
                line: Some(line),
                error,
            } => {
                let filename = src.name().to_string();
                Report::build(ReportKind::Error, (filename.clone(), line.span()))
                    .with_message(format!("parse: {error}"))
                    .with_label(
                        Label::new((filename.clone(), line.span()))
                            .with_message(error.to_string())
                            .with_color(Color::Red),
                    )
                    .with_label(
                        Label::new((filename, header.span()))
                            .with_message("in this section")
                            .with_color(Color::Blue),
                    )
                    .finish()
            }
            Self::Section {
                header,
                line: None,
                error,
            } => build_report(
                src,
                ReportKind::Error,
                header.span(),
                &format!("parse: {error}"),
                "raised once this section ended",
                Color::Red,
            ),
            Self::Cancelled => build_report(
                src,
                ReportKind::Advice,
                0..0,
                "read: cancelled",
                "the read was cancelled before its end",
                Color::Yellow,
            ),
        }
    }
}

/// Convenience method: render a [`ReadError`] to the standard error.
///
/// # Parameters
/// * `name` - Name of the source file, used for display in diagnostic information
/// * `source` - Complete chart source text
/// * `err` - The error to display
pub fn emit_read_error(name: &str, source: &str, err: &ReadError) {
    let simple = SimpleSource::new(name, source);
    let report = err.to_report(&simple);
    let _ = report.eprint((name.to_string(), Source::from(source)));
}
