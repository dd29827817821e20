//! Position-tagged text events of `[Events]` and of difficulty tracks.

use super::TrackObject;

/// Text of the local event opening a solo.
pub const SOLO_START: &str = "solo";
/// Text of the local event closing a solo.
pub const SOLO_END: &str = "soloend";

/// A free-text payload at a position, written as `E "text"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Position in ticks.
    pub position: u32,
    /// Text without its quotes.
    pub text: String,
}

impl Event {
    /// Creates a new event.
    pub fn new(position: u32, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }

    /// Returns the first word of the text, which is the event type by convention.
    #[must_use]
    pub fn event_type(&self) -> &str {
        self.text.split_whitespace().next().unwrap_or_default()
    }

    /// Returns the text after the event type.
    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        self.text
            .trim_start()
            .split_once(char::is_whitespace)
            .map(|(_, argument)| argument.trim())
    }

    /// Checks whether the event opens a solo.
    #[must_use]
    pub fn is_solo_start(&self) -> bool {
        self.text == SOLO_START
    }

    /// Checks whether the event closes a solo.
    #[must_use]
    pub fn is_solo_end(&self) -> bool {
        self.text == SOLO_END
    }
}

impl TrackObject for Event {
    fn position(&self) -> u32 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_parts() {
        let event = Event::new(768, "section Verse 1");
        assert_eq!(event.event_type(), "section");
        assert_eq!(event.argument(), Some("Verse 1"));
        assert_eq!(Event::new(0, "end").argument(), None);
        assert!(Event::new(0, "soloend").is_solo_end());
        assert!(!Event::new(0, "solo ").is_solo_start());
    }
}
