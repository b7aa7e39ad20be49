//! Depth-first coordinate propagation over exact border matches
//!
//! Starting from the placed anchor tiles, each explored tile looks up its
//! right and bottom fingerprints in the [`MatchIndex`] and places the first
//! unplaced tile presenting the same fingerprint on its left or top border.
//! Newly placed tiles inside the grid bound are pushed onto a stack and
//! explored in turn; tiles placed beyond the bound keep their coordinates
//! but are never explored.

use crate::puzzle::index::MatchIndex;
use crate::puzzle::tile::{GridPos, Side, Tile, seed_order};

/// Directions probed from every explored tile
const PROBED_SIDES: [Side; 2] = [Side::Right, Side::Bottom];

/// What one assembly run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Tiles in the order they were popped and probed
    pub explored: Vec<usize>,
    /// Number of tiles that received coordinates during the run
    pub placed: usize,
    /// Tiles placed outside the grid bound and therefore not explored
    pub bounded_out: Vec<usize>,
}

/// Single-threaded traversal state
pub struct Assembler<'a> {
    index: &'a MatchIndex,
    grid_size: usize,
    stack: Vec<usize>,
    report: AssemblyReport,
}

impl<'a> Assembler<'a> {
    /// Create an assembler bounded to a `grid_size` × `grid_size` grid
    pub const fn new(index: &'a MatchIndex, grid_size: usize) -> Self {
        Self {
            index,
            grid_size,
            stack: Vec::new(),
            report: AssemblyReport {
                explored: Vec::new(),
                placed: 0,
                bounded_out: Vec::new(),
            },
        }
    }

    /// Push every placed tile inside the grid bound onto the work-list
    ///
    /// Seeds are pushed in reverse [`seed_order`] so the first tile in that
    /// order is explored first.
    pub fn seed(&mut self, tiles: &[Tile]) {
        let mut seeds: Vec<&Tile> = tiles
            .iter()
            .filter(|tile| {
                tile.placement()
                    .is_some_and(|pos| pos.within(self.grid_size))
            })
            .collect();
        seeds.sort_by(|a, b| seed_order(a, b));
        self.stack.extend(seeds.iter().rev().map(|tile| tile.id));
    }

    /// Number of tiles waiting to be explored
    pub const fn pending(&self) -> usize {
        self.stack.len()
    }

    /// Try to place the neighbour of tile `from` on `side`
    ///
    /// Picks the first tile in index order that shows `from`'s fingerprint
    /// on the opposite border, is not `from` itself and is still unplaced.
    /// Returns the newly placed tile, or `None` when no candidate qualifies.
    pub fn probe(&mut self, tiles: &mut [Tile], from: usize, side: Side) -> Option<usize> {
        let origin = tiles.get(from)?;
        let pos = origin.placement()?.neighbour(side);
        let fingerprint = origin.fingerprint(side);

        let candidate = self
            .index
            .facing(fingerprint, side.opposite())
            .find(|&id| id != from && tiles.get(id).is_some_and(|tile| !tile.is_placed()))?;

        let tile = tiles.get_mut(candidate)?;
        if !tile.place(pos) {
            return None;
        }
        self.report.placed += 1;
        log::trace!(
            "tile {candidate} placed at ({}, {}) via {side:?} of tile {from}",
            pos.column,
            pos.row
        );

        if pos.within(self.grid_size) {
            self.stack.push(candidate);
        } else {
            self.report.bounded_out.push(candidate);
        }
        Some(candidate)
    }

    /// Pop one tile and probe its right and bottom neighbours
    ///
    /// Returns `false` once the work-list is empty.
    pub fn step(&mut self, tiles: &mut [Tile]) -> bool {
        let Some(current) = self.stack.pop() else {
            return false;
        };
        self.report.explored.push(current);

        for side in PROBED_SIDES {
            self.probe(tiles, current, side);
        }
        true
    }

    /// Seed from the placed tiles and explore until nothing is left
    pub fn run(mut self, tiles: &mut [Tile]) -> AssemblyReport {
        self.seed(tiles);
        while self.step(tiles) {}
        self.report
    }

    /// Report accumulated so far
    pub const fn report(&self) -> &AssemblyReport {
        &self.report
    }
}

/// Build the match index and assemble `tiles` in one call
pub fn assemble(tiles: &mut [Tile], grid_size: usize) -> AssemblyReport {
    let index = MatchIndex::build(tiles);
    Assembler::new(&index, grid_size).run(tiles)
}

/// Coordinates of every placed tile, by tile index
pub fn placements(tiles: &[Tile]) -> Vec<(usize, GridPos)> {
    tiles
        .iter()
        .filter_map(|tile| tile.placement().map(|pos| (tile.id, pos)))
        .collect()
}
