//! The section scanner.
//!
//! One pass over the source lines walks `SeekHeader → AwaitBodyStart → InBody` for every
//! section. The [`SectionResolver`] decides what happens to each header: skipped sections are
//! never buffered, the others get a parser fed through a streamed queue. Parsers either run after
//! the scan ([`ExecutionMode::Blocking`]) or on one scoped worker thread per section while the
//! scan goes on ([`ExecutionMode::Concurrent`]).
//!
//! Results and errors are reported in file order in both modes.

use std::{
    io::{self, BufRead},
    panic,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, ScopedJoinHandle},
};

use tracing::{debug, trace, warn};

use super::{
    ReadError,
    command::{
        header::SectionKind,
        is_header, is_section_end, is_section_start,
        mixin::SourceLine,
    },
    config::{ComponentList, UnknownSectionPolicy},
    parse::{ParsedSection, SectionParser, new_parser, unknown::UnknownSectionParser},
    queue::{QueueReader, QueueWriter, streamed_queue},
    session::ReadSession,
};

/// A cooperative cancellation signal shared between a caller and a read operation.
///
/// The scanner checks it before every line and every worker checks it before every line it
/// parses. A cancelled read returns [`ReadError::Cancelled`] and never a partial result.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token not cancelled yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every operation observing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Checks whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// How section parsers are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionMode {
    /// Buffer every section and parse them one after another once the scan ended.
    #[default]
    Blocking,
    /// Parse every section on its own thread while the scan goes on.
    Concurrent,
}

/// What to do with the body of a section.
pub enum SectionTarget {
    /// Skip the body without buffering it.
    Skip,
    /// Feed the body to the parser.
    Parse(Box<dyn SectionParser>),
}

impl std::fmt::Debug for SectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => f.write_str("Skip"),
            Self::Parse(_) => f.write_str("Parse(..)"),
        }
    }
}

/// Maps section headers to their targets.
pub trait SectionResolver {
    /// Resolves the trimmed header line.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnknownSection`] if the header is rejected.
    fn resolve(&self, header: &SourceLine) -> Result<SectionTarget, ReadError>;
}

/// Resolves the sections selected by a [`ComponentList`].
///
/// Unknown headers are only resolved, by the unknown section policy, when the list selects
/// unknown sections. Otherwise they are skipped like unselected built-in sections.
#[derive(Debug, Clone, Copy)]
pub struct ComponentResolver<'a> {
    components: &'a ComponentList,
    session: ReadSession,
}

impl<'a> ComponentResolver<'a> {
    /// Creates a resolver of the selected sections.
    #[must_use]
    pub const fn new(components: &'a ComponentList, session: ReadSession) -> Self {
        Self {
            components,
            session,
        }
    }

    fn is_selected(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Metadata => self.components.metadata,
            SectionKind::SyncTrack => self.components.sync_track,
            SectionKind::GlobalEvents => self.components.global_events,
            SectionKind::Track {
                instrument,
                difficulty,
            } => self.components.instruments.contains(instrument, difficulty),
        }
    }
}

impl SectionResolver for ComponentResolver<'_> {
    fn resolve(&self, header: &SourceLine) -> Result<SectionTarget, ReadError> {
        match SectionKind::from_header(header.content()) {
            Some(kind) if self.is_selected(kind) => {
                Ok(SectionTarget::Parse(new_parser(kind, self.session)))
            }
            Some(_) => Ok(SectionTarget::Skip),
            None if !self.components.unknown_sections => Ok(SectionTarget::Skip),
            None => match self.session.config.unknown_section_policy {
                UnknownSectionPolicy::Throw => Err(ReadError::UnknownSection {
                    header: header.clone(),
                }),
                UnknownSectionPolicy::Store => Ok(SectionTarget::Parse(Box::new(
                    UnknownSectionParser::new(header.content().as_str()),
                ))),
            },
        }
    }
}

/// Lines of a reader along with their location. Every line is trimmed, and a leading byte order
/// mark is dropped.
#[derive(Debug)]
pub struct SourceLines<R> {
    reader: R,
    buffer: String,
    line: usize,
    offset: usize,
}

impl<R: BufRead> SourceLines<R> {
    /// Wraps a reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line: 0,
            offset: 0,
        }
    }
}

impl<R: BufRead> Iterator for SourceLines<R> {
    type Item = io::Result<SourceLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(read) => {
                let start = self.offset;
                self.offset += read;
                self.line += 1;
                let raw = self.buffer.trim_end_matches(['\n', '\r']);
                let content = raw.trim_start_matches('\u{feff}').trim();
                Some(Ok(SourceLine::new(
                    content.to_owned(),
                    self.line,
                    start..start + raw.len(),
                )))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

enum State {
    SeekHeader,
    AwaitBodyStart {
        header: SourceLine,
        writer: Option<QueueWriter<SourceLine>>,
    },
    InBody {
        header: SourceLine,
        writer: Option<QueueWriter<SourceLine>>,
    },
}

impl State {
    /// Returns whether the section in flight, if any, was handed to a parser.
    fn has_dispatched_section(&self) -> bool {
        match self {
            Self::SeekHeader => false,
            Self::AwaitBodyStart { writer, .. } | Self::InBody { writer, .. } => writer.is_some(),
        }
    }
}

/// A scan stopped before the end of its source.
struct Interrupted {
    error: ReadError,
    /// The last dispatched section never saw its end.
    unterminated: bool,
}

/// Walks the lines, handing every resolved section to `dispatch` as soon as its header is seen.
fn scan_lines<R: BufRead>(
    reader: R,
    resolver: &dyn SectionResolver,
    cancel: &CancellationToken,
    mut dispatch: impl FnMut(SourceLine, Box<dyn SectionParser>, QueueReader<SourceLine>),
) -> Result<(), Interrupted> {
    let mut state = State::SeekHeader;
    for line in SourceLines::new(reader) {
        let interrupt = |state: &State, error| Interrupted {
            error,
            unterminated: state.has_dispatched_section(),
        };
        if cancel.is_cancelled() {
            debug!("scan cancelled");
            return Err(interrupt(&state, ReadError::Cancelled));
        }
        let line = line.map_err(|err| interrupt(&state, ReadError::Io(err)))?;
        let text = line.content().as_str();

        state = match state {
            State::SeekHeader if is_header(text) => {
                let writer = match resolver
                    .resolve(&line)
                    .map_err(|error| interrupt(&State::SeekHeader, error))?
                {
                    SectionTarget::Skip => {
                        debug!(header = text, "skipping section");
                        None
                    }
                    SectionTarget::Parse(parser) => {
                        debug!(header = text, "dispatching section");
                        let (writer, reader) = streamed_queue();
                        dispatch(line.clone(), parser, reader);
                        Some(writer)
                    }
                };
                State::AwaitBodyStart {
                    header: line,
                    writer,
                }
            }
            State::SeekHeader => {
                if !text.is_empty() {
                    trace!(line = line.line(), "ignoring line outside of sections");
                }
                State::SeekHeader
            }
            State::AwaitBodyStart { header, writer } if is_section_start(text) => {
                State::InBody { header, writer }
            }
            State::AwaitBodyStart { header, writer } => {
                if !text.is_empty() {
                    trace!(line = line.line(), "ignoring line before section body");
                }
                State::AwaitBodyStart { header, writer }
            }
            State::InBody { .. } if is_section_end(text) => State::SeekHeader,
            State::InBody { header, mut writer } => {
                if !text.is_empty()
                    && let Some(queue) = &writer
                    && queue.push(line).is_err()
                {
                    // The parser stopped on an error, the rest of the body is not needed.
                    writer = None;
                }
                State::InBody { header, writer }
            }
        };
    }

    match state {
        State::SeekHeader => Ok(()),
        State::AwaitBodyStart { ref header, .. } | State::InBody { ref header, .. } => {
            Err(Interrupted {
                error: ReadError::EarlySectionEnd {
                    header: header.clone(),
                },
                unterminated: state.has_dispatched_section(),
            })
        }
    }
}

/// Feeds the queued lines of a section to its parser and finishes it.
fn run_section(
    header: &SourceLine,
    mut parser: Box<dyn SectionParser>,
    lines: QueueReader<SourceLine>,
    cancel: &CancellationToken,
) -> Result<ParsedSection, ReadError> {
    for line in lines {
        if cancel.is_cancelled() {
            return Err(ReadError::Cancelled);
        }
        parser
            .handle_line(line.content())
            .map_err(|error| ReadError::Section {
                header: header.clone(),
                line: Some(line),
                error,
            })?;
    }
    if cancel.is_cancelled() {
        return Err(ReadError::Cancelled);
    }
    parser.finish().map_err(|error| ReadError::Section {
        header: header.clone(),
        line: None,
        error,
    })
}

enum Job<'scope> {
    Buffered(Box<dyn SectionParser>, QueueReader<SourceLine>),
    Running(ScopedJoinHandle<'scope, Result<ParsedSection, ReadError>>),
}

struct Dispatched<'scope> {
    header: SourceLine,
    job: Job<'scope>,
}

/// Scans the reader and parses every resolved section.
///
/// # Errors
///
/// Returns the first error in file order. Errors of a section cut short by the end of the source
/// are only reported when they concern one of its lines.
pub fn scan_sections<R: BufRead>(
    reader: R,
    resolver: &dyn SectionResolver,
    mode: ExecutionMode,
    cancel: &CancellationToken,
) -> Result<Vec<ParsedSection>, ReadError> {
    thread::scope(|scope| {
        let mut dispatched = Vec::new();
        let scanned = scan_lines(reader, resolver, cancel, |header, parser, lines| {
            let job = match mode {
                ExecutionMode::Blocking => Job::Buffered(parser, lines),
                ExecutionMode::Concurrent => {
                    let worker_header = header.clone();
                    let worker_cancel = cancel.clone();
                    Job::Running(scope.spawn(move || {
                        run_section(&worker_header, parser, lines, &worker_cancel)
                    }))
                }
            };
            dispatched.push(Dispatched { header, job });
        });
        // Every queue writer is gone at this point, so running workers drain and stop.
        collect(dispatched, scanned, cancel)
    })
}

fn collect(
    dispatched: Vec<Dispatched<'_>>,
    scanned: Result<(), Interrupted>,
    cancel: &CancellationToken,
) -> Result<Vec<ParsedSection>, ReadError> {
    let (scan_error, unterminated) = match scanned {
        Ok(()) => (None, false),
        Err(Interrupted {
            error,
            unterminated,
        }) => (Some(error), unterminated),
    };
    let count = dispatched.len();
    let mut sections = Vec::with_capacity(count);
    let mut first_error = None;

    for (index, Dispatched { header, job }) in dispatched.into_iter().enumerate() {
        let result = match job {
            Job::Buffered(..) if first_error.is_some() || cancel.is_cancelled() => continue,
            Job::Buffered(parser, lines) => run_section(&header, parser, lines, cancel),
            Job::Running(handle) => match handle.join() {
                Ok(result) => result,
                Err(payload) => {
                    warn!(header = header.content().as_str(), "section worker panicked");
                    panic::resume_unwind(payload);
                }
            },
        };
        if first_error.is_some() {
            continue;
        }
        let is_unterminated = unterminated && index + 1 == count;
        match result {
            Ok(section) => sections.push(section),
            Err(ReadError::Section { line: None, .. }) if is_unterminated => {}
            Err(error) => first_error = Some(error),
        }
    }

    if cancel.is_cancelled() {
        return Err(ReadError::Cancelled);
    }
    match first_error.or(scan_error) {
        Some(error) => Err(error),
        None => Ok(sections),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chart::{
        config::ReadConfig,
        model::{event::Event, section::Section},
        parse::ParseError,
    };

    fn scan(source: &str, config: ReadConfig, mode: ExecutionMode) -> Result<Vec<ParsedSection>, ReadError> {
        let components = ComponentList::full();
        let resolver = ComponentResolver::new(&components, ReadSession::new(config));
        scan_sections(source.as_bytes(), &resolver, mode, &CancellationToken::new())
    }

    #[test]
    fn source_lines_are_located() {
        let lines: Vec<_> = SourceLines::new("\u{feff}[Song]\r\n{\n  Name = x  \n".as_bytes())
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].content(), "[Song]");
        assert_eq!(lines[0].span(), 0..9);
        assert_eq!(lines[1].span(), 11..12);
        assert_eq!(lines[2].content(), "Name = x");
        assert_eq!(lines[2].line(), 3);
    }

    #[test]
    fn sections_in_both_modes() {
        let source = "[Events]\n{\n  0 = E \"section Intro\"\n}\n\n[Custom]\n{\n  hello\n}\n";
        let config = ReadConfig::default()
            .with_unknown_section_policy(UnknownSectionPolicy::Store);
        let expected = vec![
            ParsedSection::GlobalEvents(vec![Event::new(0, "section Intro")]),
            ParsedSection::Unknown(Section {
                header: "[Custom]".into(),
                lines: vec!["hello".into()],
            }),
        ];
        assert_eq!(scan(source, config, ExecutionMode::Blocking).unwrap(), expected);
        assert_eq!(scan(source, config, ExecutionMode::Concurrent).unwrap(), expected);
    }

    #[test]
    fn unknown_sections_fail_fast_by_default() {
        let err = scan("[Custom]\n{\n}\n", ReadConfig::default(), ExecutionMode::Blocking)
            .unwrap_err();
        assert!(matches!(err, ReadError::UnknownSection { header } if header.line() == 1));
    }

    #[test]
    fn sections_must_end() {
        for mode in [ExecutionMode::Blocking, ExecutionMode::Concurrent] {
            let err = scan("[Events]\n{\n  0 = E a\n", ReadConfig::default(), mode).unwrap_err();
            assert!(matches!(err, ReadError::EarlySectionEnd { .. }));
            let err = scan("[Events]\n", ReadConfig::default(), mode).unwrap_err();
            assert!(matches!(err, ReadError::EarlySectionEnd { .. }));
        }
    }

    #[test]
    fn errors_are_reported_in_file_order() {
        let source = "[SyncTrack]\n{\n  0 = B fast\n}\n[Events]\n{\n  x\n}\n";
        for mode in [ExecutionMode::Blocking, ExecutionMode::Concurrent] {
            let err = scan(source, ReadConfig::default(), mode).unwrap_err();
            let ReadError::Section {
                header,
                line: Some(line),
                error,
            } = err
            else {
                panic!("expected a section error, found {err:?}");
            };
            assert_eq!(header.content(), "[SyncTrack]");
            assert_eq!(line.line(), 3);
            assert!(matches!(error, ParseError::ExpectedValue { .. }));
        }
    }

    #[test]
    fn line_errors_of_unterminated_sections_come_first() {
        let err = scan("[Events]\n{\n  x\n", ReadConfig::default(), ExecutionMode::Blocking)
            .unwrap_err();
        assert!(matches!(err, ReadError::Section { line: Some(_), .. }));
    }

    #[test]
    fn cancelled_scan_returns_no_result() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let components = ComponentList::full();
        let resolver = ComponentResolver::new(&components, ReadSession::default());
        let result = scan_sections(
            "[Events]\n{\n}\n".as_bytes(),
            &resolver,
            ExecutionMode::Concurrent,
            &cancel,
        );
        assert!(matches!(result, Err(ReadError::Cancelled)));
    }
}
