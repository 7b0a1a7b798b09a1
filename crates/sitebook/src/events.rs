//! Input events delivered to the typeahead overlay by its host.
//!
//! The host (a DOM binding, a terminal front end, a test) translates its
//! native events into these types and forwards them to the overlay. The
//! overlay marks them accepted or default-prevented; the host honours those
//! flags when it returns to its own event loop.

/// Common state shared by all events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventBase {
    accepted: bool,
    default_prevented: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, preventing further propagation.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing further propagation.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }

    /// Suppress the host's default action (caret movement, form submit).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether the default action was suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Keyboard keys the overlay distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    /// A printable character.
    Character(char),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        let parsed = match key {
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Delete" | "Del" => Self::Delete,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => return None,
                }
            }
        };
        Some(parsed)
    }
}

/// Key press event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key) -> Self {
        Self {
            base: EventBase::new(),
            key,
            is_repeat: false,
        }
    }

    /// Mark the event as an auto-repeat.
    pub fn repeated(mut self) -> Self {
        self.is_repeat = true;
        self
    }

    /// Whether the overlay suppressed the default action.
    pub fn is_default_prevented(&self) -> bool {
        self.base.is_default_prevented()
    }
}

/// Where a document-level pointer-down landed, relative to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The anchor text input.
    Anchor,
    /// Anywhere inside the overlay subtree, including its rows.
    Overlay,
    /// Anywhere else in the document.
    Outside,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_parsing() {
        assert_eq!(Key::from_dom_key("ArrowDown"), Some(Key::ArrowDown));
        assert_eq!(Key::from_dom_key("Esc"), Some(Key::Escape));
        assert_eq!(Key::from_dom_key("c"), Some(Key::Character('c')));
        assert_eq!(Key::from_dom_key("F5"), None);
    }

    #[test]
    fn test_event_flags() {
        let mut event = KeyPressEvent::new(Key::ArrowUp);
        assert!(!event.base.is_accepted());
        event.base.accept();
        event.base.prevent_default();
        assert!(event.base.is_accepted());
        assert!(event.is_default_prevented());
        event.base.ignore();
        assert!(!event.base.is_accepted());
    }
}
