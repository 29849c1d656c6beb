//! Drawable elements produced by renderer plugins.
//!
//! An [`Element`] groups primitives (text runs and bars) that are laid out
//! together. Coordinates are relative to the owning line's origin. Bounds are only
//! meaningful after [`Element::snap`], which the layout engine calls once per
//! plugin output before the next plugin runs.

use super::geometry::{BoundingBox, Padding};
use super::metrics::{Metrics, StyleClass};
use serde::Serialize;

/// A single drawable shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    /// A run of text.
    Text {
        /// Covered area.
        bounds: BoundingBox,
        /// Characters to draw.
        text: String,
        /// Visual style.
        style: StyleClass,
    },
    /// A filled rectangle.
    Bar {
        /// Covered area.
        bounds: BoundingBox,
        /// Visual style.
        style: StyleClass,
    },
}

impl Primitive {
    /// Text at `(x, y)` sized from `metrics`.
    pub fn text(
        x: i32,
        y: i32,
        text: impl Into<String>,
        style: StyleClass,
        metrics: &Metrics,
    ) -> Self {
        let text = text.into();
        let width = metrics.text_width(text.chars().count());
        Primitive::Text {
            bounds: BoundingBox::from_origin(x, y, width, metrics.char_height()),
            text,
            style,
        }
    }

    /// Bar covering `bounds`.
    pub fn bar(bounds: BoundingBox, style: StyleClass) -> Self {
        Primitive::Bar { bounds, style }
    }

    /// Covered area.
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Primitive::Text { bounds, .. } | Primitive::Bar { bounds, .. } => *bounds,
        }
    }

    /// Visual style.
    pub fn style(&self) -> StyleClass {
        match self {
            Primitive::Text { style, .. } | Primitive::Bar { style, .. } => *style,
        }
    }
}

/// A group of primitives laid out as one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    primitives: Vec<Primitive>,
    padding: Padding,
    anchored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<BoundingBox>,
}

impl Element {
    /// Empty anchored element.
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            padding: Padding::default(),
            anchored: true,
            bounds: None,
        }
    }

    /// Element holding a single primitive.
    pub fn with_primitive(primitive: Primitive) -> Self {
        let mut element = Self::new();
        element.push(primitive);
        element
    }

    /// Set padding around the element.
    pub fn padded(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self.bounds = None;
        self
    }

    /// Mark the element as floating: drawn, but not counted toward line height.
    pub fn floating(mut self) -> Self {
        self.anchored = false;
        self
    }

    /// Stand-in drawn for a line whose plugin failed.
    pub fn placeholder(width: u32, height: u32) -> Self {
        let mut element = Self::with_primitive(Primitive::bar(
            BoundingBox::from_origin(0, 0, width, height),
            StyleClass::Placeholder,
        ));
        element.snap();
        element
    }

    /// Add a primitive. Invalidates previously snapped bounds.
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
        self.bounds = None;
    }

    /// Primitives in draw order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Padding around the element.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Whether the element contributes to line height.
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Compute and store the padded bounds of all primitives.
    ///
    /// An element without primitives snaps to its padding around the origin.
    pub fn snap(&mut self) -> BoundingBox {
        let raw = self
            .primitives
            .iter()
            .map(Primitive::bounds)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_default();
        let bounds = raw.padded(&self.padding);
        self.bounds = Some(bounds);
        bounds
    }

    /// Padded bounds, if the element has been snapped since its last change.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}
