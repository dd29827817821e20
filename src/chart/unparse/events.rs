//! Serializer of `[Events]`.

use itertools::Itertools;

use super::{Result, SectionSerializer};
use crate::chart::{
    command::{entry::entry_line, header::GLOBAL_EVENTS_HEADER},
    model::event::Event,
    session::WriteSession,
};

/// Formats an event line, shared with the local events of tracks.
pub(crate) fn event_line(event: &Event) -> String {
    entry_line(event.position, "E", format_args!("\"{}\"", event.text))
}

/// Renders global events in position order, keeping the order of events sharing a position.
#[derive(Debug, Clone, Copy)]
pub struct GlobalEventsSerializer<'a> {
    events: &'a [Event],
}

impl<'a> GlobalEventsSerializer<'a> {
    /// Creates a serializer of the events.
    #[must_use]
    pub const fn new(events: &'a [Event]) -> Self {
        Self { events }
    }
}

impl SectionSerializer for GlobalEventsSerializer<'_> {
    fn header(&self) -> String {
        GLOBAL_EVENTS_HEADER.to_owned()
    }

    fn serialize(&self, _session: &WriteSession) -> Result<Vec<String>> {
        Ok(self
            .events
            .iter()
            .sorted_by_key(|event| event.position)
            .map(event_line)
            .collect())
    }
}
