//! Inverted index from border fingerprint to the tiles exposing it

use crate::puzzle::fingerprint::Fingerprint;
use crate::puzzle::tile::{Side, Tile};
use std::collections::HashMap;

/// One tile border carrying a given fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Tile index in the owned tile collection
    pub tile: usize,
    /// Border of that tile
    pub side: Side,
}

/// Multi-valued fingerprint lookup
///
/// Candidate lists keep insertion order: tiles in ascending index and, for
/// each tile, sides in [`Side::ALL`] order. Lookups therefore return
/// candidates in a reproducible order, which the assembler relies on to
/// break ties between colliding fingerprints.
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    entries: HashMap<Fingerprint, Vec<IndexEntry>>,
}

impl MatchIndex {
    /// Index every border of every tile
    pub fn build(tiles: &[Tile]) -> Self {
        let mut entries: HashMap<Fingerprint, Vec<IndexEntry>> =
            HashMap::with_capacity(tiles.len() * Side::ALL.len());

        for (tile, piece) in tiles.iter().enumerate() {
            for side in Side::ALL {
                entries
                    .entry(piece.fingerprint(side))
                    .or_default()
                    .push(IndexEntry { tile, side });
            }
        }

        Self { entries }
    }

    /// All borders carrying `fingerprint`, in insertion order
    pub fn candidates(&self, fingerprint: Fingerprint) -> &[IndexEntry] {
        self.entries
            .get(&fingerprint)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Tiles whose `side` border carries `fingerprint`, in insertion order
    pub fn facing(&self, fingerprint: Fingerprint, side: Side) -> impl Iterator<Item = usize> + '_ {
        self.candidates(fingerprint)
            .iter()
            .filter(move |entry| entry.side == side)
            .map(|entry| entry.tile)
    }

    /// Number of distinct fingerprints
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fingerprints shared by more than one border on the same side
    ///
    /// Each such fingerprint is a place where the assembler's first-candidate
    /// rule may pick the wrong tile.
    pub fn ambiguous(&self) -> usize {
        self.entries
            .values()
            .filter(|list| {
                Side::ALL
                    .iter()
                    .any(|&side| list.iter().filter(|entry| entry.side == side).count() > 1)
            })
            .count()
    }
}
