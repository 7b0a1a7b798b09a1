//! Keyboard navigation state machine.
//!
//! The machine is pure: [`NavState::on_key`] maps the current state, a key,
//! and the length of the filtered list to the next state plus what the
//! controller should do about it.

use crate::events::Key;

/// Open/closed state with the highlighted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Closed,
    Open {
        highlight: usize,
    },
}

/// Keys the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Escape,
}

impl NavKey {
    /// Map a host key; anything else is left to the text field.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Self::Up),
            Key::ArrowDown => Some(Self::Down),
            Key::Enter => Some(Self::Enter),
            Key::Escape => Some(Self::Escape),
            _ => None,
        }
    }
}

/// What a transition asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The key had no effect.
    Ignored,
    /// The overlay opened with the first row highlighted.
    Opened,
    /// The highlight moved.
    Moved { from: usize, to: usize },
    /// The key was handled but nothing changed (already at an edge).
    Unchanged,
    /// The row at this index was chosen; the state is now closed.
    Select(usize),
    /// The overlay closed without a selection.
    Closed,
}

/// Result of feeding one key to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: NavState,
    pub outcome: NavOutcome,
    /// Whether the text field's default action must be suppressed.
    pub prevent_default: bool,
}

impl Transition {
    fn new(state: NavState, outcome: NavOutcome, prevent_default: bool) -> Self {
        Self {
            state,
            outcome,
            prevent_default,
        }
    }
}

impl NavState {
    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// The highlighted row, if open.
    pub fn highlight(&self) -> Option<usize> {
        match self {
            Self::Open { highlight } => Some(*highlight),
            Self::Closed => None,
        }
    }

    /// Apply a key against a filtered list of `len` entries.
    pub fn on_key(self, key: NavKey, len: usize) -> Transition {
        match (self, key) {
            (Self::Closed, NavKey::Up | NavKey::Down) => {
                if len == 0 {
                    Transition::new(self, NavOutcome::Ignored, false)
                } else {
                    Transition::new(Self::Open { highlight: 0 }, NavOutcome::Opened, true)
                }
            }
            (Self::Closed, NavKey::Enter | NavKey::Escape) => {
                Transition::new(self, NavOutcome::Ignored, false)
            }
            (Self::Open { highlight }, NavKey::Down) => {
                let to = if len == 0 {
                    0
                } else {
                    (highlight + 1).min(len - 1)
                };
                Transition::new(Self::Open { highlight: to }, moved(highlight, to), true)
            }
            (Self::Open { highlight }, NavKey::Up) => {
                let to = highlight.saturating_sub(1);
                Transition::new(Self::Open { highlight: to }, moved(highlight, to), true)
            }
            (Self::Open { highlight }, NavKey::Enter) => {
                if len == 0 {
                    Transition::new(self, NavOutcome::Unchanged, false)
                } else {
                    let index = highlight.min(len - 1);
                    Transition::new(Self::Closed, NavOutcome::Select(index), true)
                }
            }
            (Self::Open { .. }, NavKey::Escape) => {
                Transition::new(Self::Closed, NavOutcome::Closed, true)
            }
        }
    }

    /// State after a new filter pass produced `len` entries.
    ///
    /// An open overlay restarts at the first row, or closes when nothing
    /// matched. A closed overlay stays closed; opening on input is the
    /// controller's decision.
    pub fn on_filter(self, len: usize) -> NavState {
        match self {
            Self::Open { .. } if len > 0 => Self::Open { highlight: 0 },
            _ => Self::Closed,
        }
    }
}

fn moved(from: usize, to: usize) -> NavOutcome {
    if from == to {
        NavOutcome::Unchanged
    } else {
        NavOutcome::Moved { from, to }
    }
}
