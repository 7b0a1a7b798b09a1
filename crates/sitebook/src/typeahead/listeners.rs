//! Global listener bookkeeping.
//!
//! While mounted, the overlay listens for pointer-down on the document and
//! for resize and scroll on the window. The host owns the actual event
//! plumbing; the overlay only asks it to add and remove registrations
//! through [`EventHost`], and reads layout through [`LayoutProbe`].

use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

use crate::geometry::{Point, Rect};

new_key_type! {
    /// Handle to a listener registered with an [`EventHost`].
    pub struct ListenerId;
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Document,
    Window,
}

/// Event the listener reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    Resize,
    Scroll,
}

/// Dispatch phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Bubble,
    /// Capture phase; scroll events from any nested container reach the
    /// window only this way.
    Capture,
}

/// Description of one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerSpec {
    pub target: ListenerTarget,
    pub kind: EventKind,
    pub phase: Phase,
}

impl ListenerSpec {
    /// A bubble-phase listener.
    pub const fn new(target: ListenerTarget, kind: EventKind) -> Self {
        Self {
            target,
            kind,
            phase: Phase::Bubble,
        }
    }

    /// The same listener in the capture phase.
    pub const fn capture(mut self) -> Self {
        self.phase = Phase::Capture;
        self
    }
}

/// The listeners an overlay keeps for its whole mounted lifetime.
pub const OVERLAY_LISTENERS: [ListenerSpec; 3] = [
    ListenerSpec::new(ListenerTarget::Document, EventKind::PointerDown),
    ListenerSpec::new(ListenerTarget::Window, EventKind::Resize),
    ListenerSpec::new(ListenerTarget::Window, EventKind::Scroll).capture(),
];

/// Host-side listener registration.
pub trait EventHost {
    /// Register a listener and return its handle.
    fn add_listener(&mut self, spec: ListenerSpec) -> ListenerId;

    /// Remove a listener. Returns `false` if the handle was unknown.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

/// An [`EventHost`] that just records registrations.
///
/// Hosts that route events themselves can wrap it; tests use it to check
/// that every registration is matched by exactly one removal.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    active: SlotMap<ListenerId, ListenerSpec>,
    added: usize,
    removed: usize,
}

impl ListenerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners currently registered.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Total registrations since creation.
    pub fn added_count(&self) -> usize {
        self.added
    }

    /// Total removals since creation.
    pub fn removed_count(&self) -> usize {
        self.removed
    }

    /// Whether a listener matching `spec` is registered.
    pub fn is_listening(&self, spec: ListenerSpec) -> bool {
        self.active.values().any(|active| *active == spec)
    }

    /// Registered listeners for a target and event.
    pub fn listeners_for(
        &self,
        target: ListenerTarget,
        kind: EventKind,
    ) -> impl Iterator<Item = (ListenerId, &ListenerSpec)> {
        self.active
            .iter()
            .filter(move |(_, spec)| spec.target == target && spec.kind == kind)
    }
}

impl EventHost for ListenerRegistry {
    fn add_listener(&mut self, spec: ListenerSpec) -> ListenerId {
        self.added += 1;
        self.active.insert(spec)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        if self.active.remove(id).is_some() {
            self.removed += 1;
            true
        } else {
            false
        }
    }
}

/// Read access to live layout.
pub trait LayoutProbe: Send + Sync {
    /// The anchor's bounding rect, relative to the viewport.
    fn anchor_rect(&self) -> Rect;

    /// Current window scroll offset.
    fn scroll_offset(&self) -> Point;
}

#[derive(Debug, Default)]
struct LayoutState {
    anchor: Rect,
    scroll: Point,
}

/// A [`LayoutProbe`] whose values are pushed in by the host.
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct SharedLayout {
    state: Arc<RwLock<LayoutState>>,
}

impl SharedLayout {
    /// Layout with the anchor at `anchor` and no scroll.
    pub fn new(anchor: Rect) -> Self {
        Self {
            state: Arc::new(RwLock::new(LayoutState {
                anchor,
                scroll: Point::ZERO,
            })),
        }
    }

    /// Move or resize the anchor.
    pub fn set_anchor(&self, anchor: Rect) {
        self.state.write().anchor = anchor;
    }

    /// Update the window scroll offset.
    pub fn set_scroll(&self, x: f32, y: f32) {
        self.state.write().scroll = Point::new(x, y);
    }
}

impl LayoutProbe for SharedLayout {
    fn anchor_rect(&self) -> Rect {
        self.state.read().anchor
    }

    fn scroll_offset(&self) -> Point {
        self.state.read().scroll
    }
}

static_assertions::assert_impl_all!(SharedLayout: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_counts() {
        let mut registry = ListenerRegistry::new();
        let ids: Vec<_> = OVERLAY_LISTENERS
            .iter()
            .map(|spec| registry.add_listener(*spec))
            .collect();
        assert_eq!(registry.active_count(), 3);
        assert!(registry.is_listening(OVERLAY_LISTENERS[2]));

        for id in &ids {
            assert!(registry.remove_listener(*id));
        }
        assert!(!registry.remove_listener(ids[0]));
        assert_eq!(registry.added_count(), 3);
        assert_eq!(registry.removed_count(), 3);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_scroll_listener_uses_capture() {
        let scroll = OVERLAY_LISTENERS
            .iter()
            .find(|spec| spec.kind == EventKind::Scroll)
            .unwrap();
        assert_eq!(scroll.target, ListenerTarget::Window);
        assert_eq!(scroll.phase, Phase::Capture);
    }

    #[test]
    fn test_shared_layout_clones_share_state() {
        let layout = SharedLayout::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let probe = layout.clone();
        layout.set_scroll(0.0, 40.0);
        assert_eq!(probe.scroll_offset(), Point::new(0.0, 40.0));
    }
}
