//! Axis-aligned boxes and padding in canvas units.

use serde::Serialize;

/// Axis-aligned bounding box. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoundingBox {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl BoundingBox {
    /// Create a box from its edges, normalizing swapped edges.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Create a box from origin and size.
    pub fn from_origin(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self::new(x, y, x + width as i32, y + height as i32)
    }

    /// Horizontal extent.
    pub fn width(&self) -> u32 {
        (self.right - self.left) as u32
    }

    /// Vertical extent.
    pub fn height(&self) -> u32 {
        (self.bottom - self.top) as u32
    }

    /// Check if the box covers no area.
    pub fn is_empty(&self) -> bool {
        self.left == self.right || self.top == self.bottom
    }

    /// Check if two boxes overlap.
    ///
    /// Boxes overlap iff their projections overlap on both axes. Touching edges do not
    /// count as overlap.
    ///
    /// ```
    /// # use seqcanvas::view_state::geometry::BoundingBox;
    /// let a = BoundingBox::new(0, 0, 10, 10);
    /// assert!(a.overlaps(&BoundingBox::new(5, 5, 15, 15)));
    /// assert!(!a.overlaps(&BoundingBox::new(10, 0, 20, 10)));
    /// ```
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Box grown outward by `padding`.
    pub fn padded(&self, padding: &Padding) -> BoundingBox {
        BoundingBox {
            left: self.left - padding.left as i32,
            top: self.top - padding.top as i32,
            right: self.right + padding.right as i32,
            bottom: self.bottom + padding.bottom as i32,
        }
    }

    /// Box moved by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> BoundingBox {
        BoundingBox {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

/// Offset applied to everything drawn on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Translation {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl Translation {
    /// Create a translation.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Padding around an element, per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Padding {
    /// Left padding.
    pub left: u32,
    /// Top padding.
    pub top: u32,
    /// Right padding.
    pub right: u32,
    /// Bottom padding.
    pub bottom: u32,
}

impl Padding {
    /// Same padding on every side.
    pub fn uniform(amount: u32) -> Self {
        Self {
            left: amount,
            top: amount,
            right: amount,
            bottom: amount,
        }
    }

    /// Padding below only.
    pub fn below(amount: u32) -> Self {
        Self {
            bottom: amount,
            ..Self::default()
        }
    }
}
