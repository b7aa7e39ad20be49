//! Tile model: pixels, border fingerprints and grid placement
//!
//! Tiles live in a single owned collection and are referred to by index
//! everywhere else. A tile's index in that collection is its `id`.

use crate::puzzle::fingerprint::{Fingerprint, Fingerprints, fingerprint_tile};
use image::RgbImage;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// One border of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// First pixel column
    Left,
    /// Last pixel column
    Right,
    /// First pixel row
    Top,
    /// Last pixel row
    Bottom,
}

impl Side {
    /// All sides in fingerprint storage order
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// The side a neighbour presents across this border
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Grid step `(column, row)` towards the neighbour on this side
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Top => (0, -1),
            Self::Bottom => (0, 1),
        }
    }

    /// Storage slot of this side in a [`Fingerprints`] array
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    /// Column, 0 at the left edge
    pub column: i32,
    /// Row, 0 at the top edge
    pub row: i32,
}

impl GridPos {
    /// The top-left cell
    pub const ORIGIN: Self = Self { column: 0, row: 0 };

    /// Create a coordinate
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Coordinate of the neighbouring cell on `side`
    pub const fn neighbour(self, side: Side) -> Self {
        let (dc, dr) = side.offset();
        Self {
            column: self.column + dc,
            row: self.row + dr,
        }
    }

    /// Whether both coordinates lie in `[0, grid_size)`
    pub fn within(self, grid_size: usize) -> bool {
        let in_range = |value: i32| usize::try_from(value).is_ok_and(|v| v < grid_size);
        in_range(self.column) && in_range(self.row)
    }
}

/// What a tile's pixel size reveals about its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Nothing known
    #[default]
    Interior,
    /// Column 0, row unknown
    FirstColumn,
    /// Row 0, column unknown
    FirstRow,
    /// Column 0 and row 0
    Corner,
}

impl Anchor {
    /// Whether the tile belongs to column 0
    pub const fn column_known(self) -> bool {
        matches!(self, Self::FirstColumn | Self::Corner)
    }

    /// Whether the tile belongs to row 0
    pub const fn row_known(self) -> bool {
        matches!(self, Self::FirstRow | Self::Corner)
    }
}

/// A rectangular piece of the original image
#[derive(Debug, Clone)]
pub struct Tile {
    /// Index of the tile in load order
    pub id: usize,
    pixels: RgbImage,
    fingerprints: Fingerprints,
    placement: Option<GridPos>,
    anchor: Anchor,
    source: Option<PathBuf>,
}

impl Tile {
    /// Wrap decoded pixels and compute their border fingerprints
    pub fn new(id: usize, pixels: RgbImage) -> Self {
        let fingerprints = fingerprint_tile(&pixels);
        Self {
            id,
            pixels,
            fingerprints,
            placement: None,
            anchor: Anchor::Interior,
            source: None,
        }
    }

    /// Remember the file the pixels came from
    #[must_use]
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Decoded pixels
    pub const fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Pixel width
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Pixel height
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// File the tile was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// All four fingerprints in [`Side::ALL`] order
    pub const fn fingerprints(&self) -> &Fingerprints {
        &self.fingerprints
    }

    /// Fingerprint of one border
    pub const fn fingerprint(&self, side: Side) -> Fingerprint {
        let [left, right, top, bottom] = self.fingerprints;
        match side {
            Side::Left => left,
            Side::Right => right,
            Side::Top => top,
            Side::Bottom => bottom,
        }
    }

    /// Grid coordinate, `None` while unplaced
    pub const fn placement(&self) -> Option<GridPos> {
        self.placement
    }

    /// Whether the tile has coordinates
    pub const fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    /// Assign coordinates once
    ///
    /// Returns `false` and leaves the tile untouched if it was already placed.
    pub const fn place(&mut self, pos: GridPos) -> bool {
        if self.placement.is_some() {
            return false;
        }
        self.placement = Some(pos);
        true
    }

    /// Size-derived position knowledge
    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Record size-derived position knowledge
    pub const fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }

    // Column/row as far as they are known, -1 where unknown
    fn known_coordinates(&self) -> (i32, i32) {
        if let Some(pos) = self.placement {
            return (pos.column, pos.row);
        }
        let column = if self.anchor.column_known() { 0 } else { -1 };
        let row = if self.anchor.row_known() { 0 } else { -1 };
        (column, row)
    }

    fn seed_key(&self) -> (u8, i32, usize) {
        let (column, row) = self.known_coordinates();
        let class = if column == 0 && row == 0 {
            0
        } else if column == 0 || row == 0 {
            1
        } else {
            2
        };
        (class, column + row, self.id)
    }
}

/// Total order used to choose which seed tile is explored first
///
/// The `(0, 0)` tile comes first, then tiles on the first row or column,
/// then everything else; ties fall back to coordinate sum and then id.
pub fn seed_order(a: &Tile, b: &Tile) -> Ordering {
    a.seed_key().cmp(&b.seed_key())
}
