//! Parser of `[Events]`.

use tracing::trace;

use super::{ParsedSection, Result, SectionParser};
use crate::chart::{command::entry::TrackEntry, model::event::Event};

/// Parses `[Events]`. Events keep their source order among equal positions.
#[derive(Debug, Default)]
pub struct GlobalEventsParser {
    events: Vec<Event>,
}

impl SectionParser for GlobalEventsParser {
    fn handle_line(&mut self, line: &str) -> Result<()> {
        let entry = TrackEntry::parse(line)?;
        if entry.kind == "E" {
            self.events.push(Event::new(entry.position, entry.text()));
        } else {
            trace!(kind = entry.kind, position = entry.position, "ignoring global entry");
        }
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<ParsedSection> {
        self.events.sort_by_key(|event| event.position);
        Ok(ParsedSection::GlobalEvents(self.events))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chart::parse::parse_lines;

    #[test]
    fn events_are_sorted_stably() {
        let parsed = parse_lines(
            Box::<GlobalEventsParser>::default(),
            [
                "768 = E \"section Chorus\"",
                "0 = E \"section Intro\"",
                "768 = E \"lyric hey\"",
                "800 = B 1000",
            ],
        )
        .unwrap();
        assert_eq!(
            parsed,
            ParsedSection::GlobalEvents(vec![
                Event::new(0, "section Intro"),
                Event::new(768, "section Chorus"),
                Event::new(768, "lyric hey"),
            ])
        );
    }
}
