//! Pixel-space composition and its inverse

/// Canvas allocation and tile stitching
pub mod canvas;
/// Cutting a source image into tiles
pub mod cutter;

pub use canvas::Canvas;
