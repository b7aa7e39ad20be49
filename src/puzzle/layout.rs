//! Occupancy grid of assembled tiles
//!
//! Summarises where assembly put every tile: which in-bound cells are
//! filled, which tiles stayed unplaced or were placed past the grid bound,
//! and which cells were claimed by more than one tile.

use crate::puzzle::tile::{GridPos, Tile};
use ndarray::Array2;

/// Final tile arrangement in grid coordinates
#[derive(Debug, Clone)]
pub struct Layout {
    /// Tile index occupying each in-bound cell, indexed by `[row, column]`
    pub cells: Array2<Option<usize>>,
    /// Tiles never reached from an anchor
    pub unplaced: Vec<usize>,
    /// Tiles placed beyond the grid bound
    pub out_of_bounds: Vec<usize>,
    /// Tiles whose cell was already taken by a lower-indexed tile
    pub conflicts: Vec<(usize, GridPos)>,
}

impl Layout {
    /// Collect placements of `tiles` into a `grid_size` × `grid_size` grid
    ///
    /// When two tiles claim the same cell the lower index keeps it.
    pub fn from_tiles(tiles: &[Tile], grid_size: usize) -> Self {
        let mut cells = Array2::from_elem((grid_size, grid_size), None);
        let mut unplaced = Vec::new();
        let mut out_of_bounds = Vec::new();
        let mut conflicts = Vec::new();

        for tile in tiles {
            let Some(pos) = tile.placement() else {
                unplaced.push(tile.id);
                continue;
            };
            if !pos.within(grid_size) {
                out_of_bounds.push(tile.id);
                continue;
            }
            let cell = [pos.row as usize, pos.column as usize];
            match cells.get_mut(cell) {
                Some(slot) if slot.is_none() => *slot = Some(tile.id),
                Some(_) => conflicts.push((tile.id, pos)),
                None => out_of_bounds.push(tile.id),
            }
        }

        Self {
            cells,
            unplaced,
            out_of_bounds,
            conflicts,
        }
    }

    /// Tile at `pos`, if an in-bound tile was placed there
    pub fn tile_at(&self, pos: GridPos) -> Option<usize> {
        let row = usize::try_from(pos.row).ok()?;
        let column = usize::try_from(pos.column).ok()?;
        self.cells.get([row, column]).copied().flatten()
    }

    /// Number of filled cells
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Fraction of cells that hold a tile
    pub fn coverage(&self) -> f64 {
        let total = self.cells.len();
        if total == 0 {
            return 0.0;
        }
        self.filled() as f64 / total as f64
    }

    /// Whether every cell is filled and no tile was left out
    pub fn is_complete(&self) -> bool {
        self.filled() == self.cells.len()
            && self.unplaced.is_empty()
            && self.out_of_bounds.is_empty()
            && self.conflicts.is_empty()
    }

    /// Cells that no tile reached, in row-major order
    pub fn missing_cells(&self) -> Vec<GridPos> {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_none())
            .map(|((row, column), _)| GridPos::new(column as i32, row as i32))
            .collect()
    }
}
