//! Reassembly of a grid-cut image from an unordered set of tiles
//!
//! Every tile border is reduced to a fingerprint. Tiles whose right (or
//! bottom) fingerprint equals another tile's left (or top) fingerprint are
//! neighbours, so coordinates can be propagated outward from the corner tile,
//! which is recognisable by its size alone. Placed tiles are then composited
//! onto a fixed-size canvas.

#![forbid(unsafe_code)]

/// Input/output, configuration, CLI and error handling
pub mod io;
/// Explicit worker pool for data-parallel phases
pub mod parallel;
/// Tile model, fingerprints, anchors, match index and assembly
pub mod puzzle;
/// Canvas composition and tile cutting
pub mod render;

pub use io::error::{PuzzleError, Result};
