//! Puzzle model and assembly
//!
//! This module contains the reconstruction core:
//! - Tile model and grid coordinates
//! - Border fingerprints
//! - Anchor detection from tile sizes
//! - Fingerprint match index
//! - Coordinate propagation
//! - Occupancy layout of the result

/// Size-based anchor detection
pub mod anchor;
/// Depth-first coordinate propagation
pub mod assembler;
/// Border fingerprint computation
pub mod fingerprint;
/// Fingerprint to tile inverted index
pub mod index;
/// Occupancy grid of placed tiles
pub mod layout;
/// Tile model, sides and grid coordinates
pub mod tile;

pub use tile::{GridPos, Side, Tile};
