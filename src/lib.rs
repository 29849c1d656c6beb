//! seqcanvas
//!
//! Coordinate model and incremental line layout for a DNA sequence canvas.
//!
//! - [`model`]: ranges, GenBank location text, reverse complement, sequences
//! - [`view_state`]: the layout engine, its lines, plugins and surfaces
//! - [`plugins`]: built-in renderers (ruler, strands, feature bars)
//! - [`view`]: the ASCII surface used by the command-line tool

pub mod config;
pub mod logging;
pub mod model;
pub mod plugins;
pub mod view;
pub mod view_state;
