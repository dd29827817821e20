//! Mixin types attaching source locations to values.
//!
//! - [`Located`] wraps a value with the 1-based line number it came from and the byte span of
//!   that line in the source.
//! - [`LocatedExt`] provides extension methods to wrap any value with the location of another.

use std::ops::Range;

/// A generic wrapper that attaches a line location to a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Located<T> {
    /// Wrapped content value
    content: T,
    /// Line number in the source, starts with 1.
    line: usize,
    /// Byte span of the line in the source, without its line terminator.
    span: Range<usize>,
}

/// A line of the source, trimmed, along with its location.
pub type SourceLine = Located<String>;

impl<T> Located<T> {
    /// Instances a new `Located`.
    pub const fn new(content: T, line: usize, span: Range<usize>) -> Self {
        Self {
            content,
            line,
            span,
        }
    }

    /// Returns the wrapped content.
    pub const fn content(&self) -> &T {
        &self.content
    }

    /// Leans the content out of the wrapper.
    pub fn into_content(self) -> T {
        self.content
    }

    /// Returns the line number, starting with 1.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the byte span of the line.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the inner reference version of the wrapper.
    pub fn inner_ref(&self) -> Located<&T> {
        Located::new(&self.content, self.line, self.span.clone())
    }

    /// Maps the content of the wrapper.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Located<U> {
        Located::new(f(self.content), self.line, self.span)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Located<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` at line {}", self.content, self.line)
    }
}

impl<T: std::error::Error + 'static> std::error::Error for Located<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.content)
    }
}

/// Extension methods for [`Located`].
pub trait LocatedExt {
    /// Instances a new `Located` with the same location as a wrapper.
    fn located_as<W>(self, wrapper: &Located<W>) -> Located<Self>
    where
        Self: Sized,
    {
        Located::new(self, wrapper.line, wrapper.span.clone())
    }
}

impl<T> LocatedExt for T {}
