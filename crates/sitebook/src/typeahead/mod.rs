//! Typeahead overlay.
//!
//! A free-text input paired with a floating list of matching candidates:
//!
//! - [`filter`](filter::filter) computes the matches for a query.
//! - [`NavState`] is the keyboard state machine (closed, or open with a
//!   highlighted row).
//! - [`OverlayPlacement`] positions the list under its anchor.
//! - [`TypeaheadOverlay`] ties them together and manages global listeners
//!   through an [`EventHost`].

mod candidate;
pub mod filter;
mod listeners;
mod navigation;
mod overlay;
mod placement;
mod view;

pub use candidate::{Candidate, Suggestion};
pub use filter::{DEFAULT_MIN_CHARS, filter};
pub use listeners::{
    EventHost, EventKind, LayoutProbe, ListenerId, ListenerRegistry, ListenerSpec, ListenerTarget,
    OVERLAY_LISTENERS, Phase, SharedLayout,
};
pub use navigation::{NavKey, NavOutcome, NavState, Transition};
pub use overlay::{TypeaheadOptions, TypeaheadOverlay};
pub use placement::{
    DEFAULT_GUTTER, DEFAULT_MIN_WIDTH, OVERLAY_Z_INDEX, OverlayPlacement, OverlayRect,
    compute_rect,
};
pub use view::{
    DEFAULT_MAX_RENDERED, InputAttributes, OptionRow, OverlayView, listbox_id, option_id,
};
