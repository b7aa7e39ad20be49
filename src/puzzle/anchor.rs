//! Anchor detection from tile dimensions
//!
//! First-column tiles are narrower and first-row tiles shorter than interior
//! tiles, so a tile's size alone tells whether it sits in column 0, row 0 or
//! both. Only the corner tile is fully determined and gets coordinates.

use crate::io::configuration::TileGeometry;
use crate::io::error::{PuzzleError, Result};
use crate::puzzle::tile::{Anchor, GridPos, Tile};

/// Counts of each anchor class found in a tile set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnchorSummary {
    /// Tiles placed at `(0, 0)`
    pub corners: usize,
    /// Tiles known to be in column 0 only
    pub first_column: usize,
    /// Tiles known to be in row 0 only
    pub first_row: usize,
    /// Tiles with no size-derived knowledge
    pub interior: usize,
}

/// Classify a tile by its pixel size
///
/// # Errors
///
/// Returns [`PuzzleError::UnexpectedTileSize`] if the width is neither the
/// first-column nor the interior width, or the height is neither the
/// first-row nor the interior height
pub fn classify(tile: usize, width: u32, height: u32, geometry: &TileGeometry) -> Result<Anchor> {
    let first_column = width == geometry.first_col_width;
    let first_row = height == geometry.first_row_height;

    if (!first_column && width != geometry.tile_width)
        || (!first_row && height != geometry.tile_height)
    {
        return Err(PuzzleError::UnexpectedTileSize {
            tile,
            width,
            height,
        });
    }

    Ok(match (first_column, first_row) {
        (true, true) => Anchor::Corner,
        (true, false) => Anchor::FirstColumn,
        (false, true) => Anchor::FirstRow,
        (false, false) => Anchor::Interior,
    })
}

/// Record every tile's anchor class and place corner tiles at `(0, 0)`
///
/// Finding no corner is not an error here; the caller decides whether an
/// empty seed set is fatal.
///
/// # Errors
///
/// Returns an error if any tile has a size outside both size categories
pub fn detect_anchors(tiles: &mut [Tile], geometry: &TileGeometry) -> Result<AnchorSummary> {
    let mut summary = AnchorSummary::default();

    for tile in tiles.iter_mut() {
        let anchor = classify(tile.id, tile.width(), tile.height(), geometry)?;
        tile.set_anchor(anchor);
        match anchor {
            Anchor::Corner => {
                tile.place(GridPos::ORIGIN);
                summary.corners += 1;
            }
            Anchor::FirstColumn => summary.first_column += 1,
            Anchor::FirstRow => summary.first_row += 1,
            Anchor::Interior => summary.interior += 1,
        }
    }

    if summary.corners > 1 {
        log::debug!("{} tiles qualify as the (0, 0) corner", summary.corners);
    }

    Ok(summary)
}
