//! The typeahead overlay controller.
//!
//! [`TypeaheadOverlay`] owns the query, derives the filtered list from it,
//! drives the navigation state machine, and keeps the overlay positioned
//! under its anchor. Hosts feed it input events and render whatever
//! [`render`](TypeaheadOverlay::render) returns.
//!
//! # Example
//!
//! ```
//! use sitebook::geometry::Rect;
//! use sitebook::typeahead::{ListenerRegistry, SharedLayout, Suggestion, TypeaheadOptions, TypeaheadOverlay};
//!
//! let layout = SharedLayout::new(Rect::new(0.0, 0.0, 300.0, 32.0));
//! let mut overlay = TypeaheadOverlay::new(layout, TypeaheadOptions::default().input_id("item"));
//! overlay.set_candidates(vec![Suggestion::new("Cement"), Suggestion::new("Steel Rod")]);
//!
//! overlay.selected.connect(|choice: &Suggestion| println!("picked {}", choice.label));
//!
//! let mut host = ListenerRegistry::new();
//! overlay.mount(&mut host);
//! overlay.set_query("ce");
//! assert_eq!(overlay.filtered().len(), 1);
//! overlay.unmount(&mut host);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sitebook_core::logging::targets;
use sitebook_core::{PerfSpan, Signal};

use super::candidate::Candidate;
use super::filter::{DEFAULT_MIN_CHARS, filter};
use super::listeners::{EventHost, LayoutProbe, ListenerId, OVERLAY_LISTENERS};
use super::navigation::{NavKey, NavOutcome, NavState};
use super::placement::{OverlayPlacement, OverlayRect};
use super::view::{
    DEFAULT_MAX_RENDERED, InputAttributes, OptionRow, OverlayView, listbox_id, option_id,
};
use crate::events::{KeyPressEvent, PointerTarget};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// Options
// ============================================================================

/// Construction options for a [`TypeaheadOverlay`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypeaheadOptions {
    pub input_id: Option<String>,
    pub placeholder: Option<String>,
    pub disabled: bool,
    pub min_chars: usize,
    pub max_rendered: usize,
    pub placement: OverlayPlacement,
}

impl Default for TypeaheadOptions {
    fn default() -> Self {
        Self {
            input_id: None,
            placeholder: None,
            disabled: false,
            min_chars: DEFAULT_MIN_CHARS,
            max_rendered: DEFAULT_MAX_RENDERED,
            placement: OverlayPlacement::default(),
        }
    }
}

impl TypeaheadOptions {
    /// Set the id of the anchor input; row ids derive from it.
    pub fn input_id(mut self, id: impl Into<String>) -> Self {
        self.input_id = Some(id.into());
        self
    }

    /// Set the input placeholder.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Disable the input.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Minimum trimmed query length before anything matches.
    pub fn min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Cap on rendered rows.
    pub fn max_rendered(mut self, max_rendered: usize) -> Self {
        self.max_rendered = max_rendered;
        self
    }

    /// Placement parameters.
    pub fn placement(mut self, placement: OverlayPlacement) -> Self {
        self.placement = placement;
        self
    }
}

// ============================================================================
// Overlay
// ============================================================================

/// Typeahead overlay attached to one text input.
pub struct TypeaheadOverlay<C: Candidate + 'static> {
    options: TypeaheadOptions,
    base_id: String,
    layout: Arc<dyn LayoutProbe>,
    query: String,
    candidates: Vec<C>,
    filtered: Vec<C>,
    nav: NavState,
    focused: bool,
    rect: Option<OverlayRect>,
    listeners: Vec<ListenerId>,

    /// Emitted with the raw input text on every edit.
    pub text_changed: Signal<String>,
    /// Emitted with the chosen candidate, before the overlay closes.
    pub selected: Signal<C>,
    /// Emitted with the row index when the keyboard moves the highlight.
    ///
    /// Hosts scroll that row into view with "nearest" alignment.
    pub scroll_into_view: Signal<usize>,
    /// Emitted when the overlay opens or closes.
    pub open_changed: Signal<bool>,
}

impl<C: Candidate + 'static> TypeaheadOverlay<C> {
    /// Create a closed overlay reading layout from `layout`.
    pub fn new(layout: impl LayoutProbe + 'static, options: TypeaheadOptions) -> Self {
        let base_id = options.input_id.clone().unwrap_or_else(|| {
            format!("typeahead-{}", NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
        });
        Self {
            options,
            base_id,
            layout: Arc::new(layout),
            query: String::new(),
            candidates: Vec::new(),
            filtered: Vec::new(),
            nav: NavState::Closed,
            focused: false,
            rect: None,
            listeners: Vec::new(),
            text_changed: Signal::new(),
            selected: Signal::new(),
            scroll_into_view: Signal::new(),
            open_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The options the overlay was built with.
    pub fn options(&self) -> &TypeaheadOptions {
        &self.options
    }

    /// Id of the anchor input.
    pub fn input_id(&self) -> &str {
        &self.base_id
    }

    /// Current query text, untrimmed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// All candidates.
    pub fn candidates(&self) -> &[C] {
        &self.candidates
    }

    /// Candidates matching the current query, uncapped.
    pub fn filtered(&self) -> &[C] {
        &self.filtered
    }

    /// Navigation state.
    pub fn state(&self) -> NavState {
        self.nav
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        self.nav.is_open()
    }

    /// Highlighted row, if open.
    pub fn highlight(&self) -> Option<usize> {
        self.nav.highlight()
    }

    /// Current overlay position, if open.
    pub fn rect(&self) -> Option<OverlayRect> {
        self.rect
    }

    /// Whether the input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether global listeners are registered.
    pub fn is_mounted(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Number of rows that are, or would be, rendered.
    pub fn rendered_len(&self) -> usize {
        self.filtered.len().min(self.options.max_rendered)
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Handle an edit of the input text.
    ///
    /// Emits [`text_changed`](Self::text_changed) with the raw text, then
    /// refilters. The overlay opens with the first row highlighted if
    /// anything matches, and closes otherwise.
    pub fn set_query(&mut self, text: impl Into<String>) {
        if self.options.disabled {
            return;
        }
        let text = text.into();
        self.query.clone_from(&text);
        self.focused = true;
        self.text_changed.emit(text);
        self.refilter(true);
    }

    /// Replace the candidate list.
    ///
    /// An open overlay restarts at the first row. A closed overlay opens
    /// only if the input has focus.
    pub fn set_candidates(&mut self, candidates: Vec<C>) {
        self.candidates = candidates;
        self.refilter(self.focused);
    }

    /// Mark the input focused without opening the overlay.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Handle a key press on the input.
    ///
    /// Navigation keys are accepted and, where the state machine asks for
    /// it, have their default action suppressed. Other keys are ignored.
    pub fn key_press(&mut self, event: &mut KeyPressEvent) {
        if self.options.disabled {
            event.base.ignore();
            return;
        }
        let Some(key) = NavKey::from_key(event.key) else {
            event.base.ignore();
            return;
        };

        let transition = self.nav.on_key(key, self.rendered_len());
        if transition.prevent_default {
            event.base.prevent_default();
        }

        match transition.outcome {
            NavOutcome::Ignored => event.base.ignore(),
            NavOutcome::Unchanged => event.base.accept(),
            NavOutcome::Opened => {
                event.base.accept();
                self.set_state(transition.state);
                self.scroll_into_view.emit(0);
            }
            NavOutcome::Moved { to, .. } => {
                event.base.accept();
                self.set_state(transition.state);
                self.scroll_into_view.emit(to);
            }
            NavOutcome::Select(index) => {
                event.base.accept();
                self.select(index);
            }
            NavOutcome::Closed => {
                event.base.accept();
                self.set_state(transition.state);
            }
        }
    }

    /// Handle a document-level pointer-down.
    ///
    /// A press outside both the anchor and the overlay closes the overlay
    /// and drops focus; the query is kept.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        match target {
            PointerTarget::Anchor => self.focused = true,
            PointerTarget::Overlay => {}
            PointerTarget::Outside => {
                tracing::trace!(target: targets::TYPEAHEAD, input = %self.base_id, "outside pointer-down");
                self.focused = false;
                self.set_state(NavState::Closed);
            }
        }
    }

    /// Handle a pointer-down on a rendered row. Selects it.
    ///
    /// Selection happens on press rather than click so the row is chosen
    /// before the input loses focus.
    pub fn row_pointer_down(&mut self, index: usize) {
        if self.is_open() && index < self.rendered_len() {
            self.select(index);
        }
    }

    /// Move the highlight to a hovered row. Does not scroll.
    pub fn hover_row(&mut self, index: usize) {
        if self.is_open() && index < self.rendered_len() {
            self.nav = NavState::Open { highlight: index };
        }
    }

    /// Handle a window resize.
    pub fn on_resize(&mut self) {
        self.reposition();
    }

    /// Handle a scroll anywhere in the document.
    pub fn on_scroll(&mut self) {
        self.reposition();
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Register global listeners with the host. Returns `false` if already
    /// mounted.
    pub fn mount(&mut self, host: &mut dyn EventHost) -> bool {
        if self.is_mounted() {
            return false;
        }
        self.listeners = OVERLAY_LISTENERS
            .iter()
            .map(|spec| host.add_listener(*spec))
            .collect();
        tracing::debug!(
            target: targets::TYPEAHEAD,
            input = %self.base_id,
            listeners = self.listeners.len(),
            "mounted"
        );
        true
    }

    /// Remove the listeners registered by [`mount`](Self::mount). Returns
    /// `false` if not mounted.
    pub fn unmount(&mut self, host: &mut dyn EventHost) -> bool {
        if !self.is_mounted() {
            return false;
        }
        for id in self.listeners.drain(..) {
            if !host.remove_listener(id) {
                tracing::warn!(target: targets::TYPEAHEAD, ?id, "host did not know listener");
            }
        }
        self.set_state(NavState::Closed);
        tracing::debug!(target: targets::TYPEAHEAD, input = %self.base_id, "unmounted");
        true
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// The overlay to draw, or `None` while closed.
    pub fn render(&self) -> Option<OverlayView> {
        let highlight = self.nav.highlight()?;
        let rect = self.rect?;
        let rows = self
            .filtered
            .iter()
            .take(self.options.max_rendered)
            .enumerate()
            .map(|(index, candidate)| OptionRow {
                index,
                id: option_id(&self.base_id, index),
                key: candidate.key().to_string(),
                label: candidate.label().to_string(),
                secondary: candidate.secondary_label().map(str::to_string),
                active: index == highlight,
            })
            .collect();

        Some(OverlayView {
            id: listbox_id(&self.base_id),
            rect,
            rows,
            total_matches: self.filtered.len(),
        })
    }

    /// Attributes for the anchor input.
    pub fn input_attributes(&self) -> InputAttributes {
        InputAttributes {
            id: self.base_id.clone(),
            value: self.query.clone(),
            placeholder: self.options.placeholder.clone(),
            disabled: self.options.disabled,
            expanded: self.is_open(),
            controls: listbox_id(&self.base_id),
            active_descendant: self
                .nav
                .highlight()
                .map(|index| option_id(&self.base_id, index)),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn refilter(&mut self, may_open: bool) {
        let previous_len = self.filtered.len();
        let span = PerfSpan::new("typeahead.filter");
        self.filtered = filter(&self.query, &self.candidates, self.options.min_chars);
        drop(span);
        tracing::trace!(
            target: targets::TYPEAHEAD,
            query = %self.query,
            matches = self.filtered.len(),
            "filtered"
        );

        let next = match self.nav.on_filter(self.filtered.len()) {
            NavState::Closed if may_open && !self.filtered.is_empty() => {
                NavState::Open { highlight: 0 }
            }
            next => next,
        };
        let was_open = self.nav.is_open();
        self.set_state(next);
        if was_open && next.is_open() && previous_len != self.filtered.len() {
            self.reposition();
        }
    }

    fn select(&mut self, index: usize) {
        let Some(candidate) = self.filtered.get(index).cloned() else {
            return;
        };
        tracing::debug!(
            target: targets::TYPEAHEAD,
            input = %self.base_id,
            index,
            label = candidate.label(),
            "candidate selected"
        );
        self.selected.emit(candidate);
        self.set_state(NavState::Closed);
    }

    fn set_state(&mut self, next: NavState) {
        let was_open = self.nav.is_open();
        self.nav = next;
        match (was_open, next.is_open()) {
            (false, true) => {
                self.reposition();
                self.open_changed.emit(true);
            }
            (true, false) => {
                self.rect = None;
                self.open_changed.emit(false);
            }
            _ => {}
        }
    }

    fn reposition(&mut self) {
        if !self.nav.is_open() {
            return;
        }
        let rect = self
            .options
            .placement
            .compute(self.layout.anchor_rect(), self.layout.scroll_offset());
        self.rect = Some(rect);
    }
}

impl<C: Candidate + 'static> Drop for TypeaheadOverlay<C> {
    fn drop(&mut self) {
        if self.is_mounted() {
            tracing::warn!(
                target: targets::TYPEAHEAD,
                input = %self.base_id,
                listeners = self.listeners.len(),
                "overlay dropped while mounted; host listeners leak"
            );
        }
    }
}

impl<C: Candidate + std::fmt::Debug + 'static> std::fmt::Debug for TypeaheadOverlay<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeaheadOverlay")
            .field("input_id", &self.base_id)
            .field("query", &self.query)
            .field("matches", &self.filtered.len())
            .field("state", &self.nav)
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
