//! View-state layer - incremental line layout
//!
//! This module turns a sequence into a vertical stack of lines and keeps that
//! stack up to date as the sequence, zoom, and viewport change.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (LineIndex, Zoom, ViewportDimensions)
//! - `geometry`: BoundingBox, Padding, Translation
//! - `metrics`: Font metrics, display mode, and the text-measurement boundary
//! - `element`: Element and Primitive - what plugins draw
//! - `line`: Line - per-line layout state
//! - `height_index`: HeightIndex - O(log n) prefix sums via Fenwick tree
//! - `layout_params`: LayoutConfig and LayoutParams
//! - `invalidation`: Marking lines dirty, deferred plugin requests
//! - `plugin`: RendererPlugin and RedrawContext
//! - `surface`: Surface boundary and in-memory surfaces
//! - `engine`: LayoutEngine - the render pass
//! - `command`: EngineCommand dispatch
//! - `report`: RenderReport and CancelToken

pub mod command;
pub mod element;
pub mod engine;
pub mod geometry;
pub mod height_index;
pub mod invalidation;
pub mod layout_params;
pub mod line;
pub mod metrics;
pub mod plugin;
pub mod report;
pub mod surface;
pub mod types;

pub use command::EngineCommand;
pub use element::{Element, Primitive};
pub use engine::LayoutEngine;
pub use geometry::{BoundingBox, Padding, Translation};
pub use layout_params::LayoutConfig;
pub use line::{Line, LineFailure};
pub use metrics::{DisplayMode, Metrics, MonospaceMeasurer, StyleClass, TextExtent, TextMeasurer};
pub use plugin::{RedrawContext, RendererPlugin};
pub use report::{CancelToken, RenderReport};
pub use surface::{ContentHandle, NullSurface, RecordingSurface, Surface};
pub use types::{LineIndex, ViewportDimensions, Zoom};
