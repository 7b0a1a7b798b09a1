//! Overlay positioning.
//!
//! The overlay is placed in document coordinates directly below its anchor,
//! left-aligned with it, at least as wide as the anchor and never narrower
//! than a fixed minimum.

use crate::geometry::{Point, Rect};

/// Vertical gap between the anchor's bottom edge and the overlay.
pub const DEFAULT_GUTTER: f32 = 6.0;

/// Narrowest width the overlay is ever given.
pub const DEFAULT_MIN_WIDTH: f32 = 260.0;

/// Stacking order of the overlay layer.
pub const OVERLAY_Z_INDEX: i32 = 1000;

/// Computed overlay position, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub z_index: i32,
}

/// Placement parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    pub gutter: f32,
    pub min_width: f32,
    pub z_index: i32,
}

impl Default for OverlayPlacement {
    fn default() -> Self {
        Self {
            gutter: DEFAULT_GUTTER,
            min_width: DEFAULT_MIN_WIDTH,
            z_index: OVERLAY_Z_INDEX,
        }
    }
}

impl OverlayPlacement {
    /// Override the gutter.
    pub fn with_gutter(mut self, gutter: f32) -> Self {
        self.gutter = gutter;
        self
    }

    /// Override the minimum width.
    pub fn with_min_width(mut self, min_width: f32) -> Self {
        self.min_width = min_width;
        self
    }

    /// Place the overlay under a viewport-relative `anchor` rect.
    pub fn compute(&self, anchor: Rect, scroll: Point) -> OverlayRect {
        OverlayRect {
            top: anchor.bottom() + scroll.y + self.gutter,
            left: anchor.left() + scroll.x,
            width: anchor.width().max(self.min_width),
            z_index: self.z_index,
        }
    }
}

/// Place the overlay using the default parameters.
pub fn compute_rect(anchor: Rect, scroll_x: f32, scroll_y: f32) -> OverlayRect {
    OverlayPlacement::default().compute(anchor, Point::new(scroll_x, scroll_y))
}
