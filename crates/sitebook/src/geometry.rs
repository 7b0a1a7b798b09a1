//! Layout geometry in CSS pixels.
//!
//! `x` grows to the right and `y` grows downward. Rects reported by a host
//! are viewport-relative, like `getBoundingClientRect()`; adding the window
//! scroll offset converts them to document coordinates.

/// A position, or a scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box: top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Whether `p` lies inside. The right and bottom edges are exclusive.
    pub fn contains(&self, p: Point) -> bool {
        (self.left()..self.right()).contains(&p.x) && (self.top()..self.bottom()).contains(&p.y)
    }

    /// The same box moved by `delta`.
    pub fn translated(&self, delta: Point) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }
}
