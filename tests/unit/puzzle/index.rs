//! Tests for multi-valued fingerprint lookup and its ordering

#[cfg(test)]
mod tests {
    use crate::fixtures::{noise_image, solid_image};
    use tilestitch::puzzle::index::{IndexEntry, MatchIndex};
    use tilestitch::puzzle::tile::{Side, Tile};

    #[test]
    fn test_empty_index() {
        let index = MatchIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.candidates(42).is_empty());
        assert_eq!(index.facing(42, Side::Left).count(), 0);
    }

    // Every border of a noise tile is indexed under its own fingerprint
    #[test]
    fn test_build_indexes_every_border() {
        let tile = Tile::new(0, noise_image(8, 8, 1));
        let index = MatchIndex::build(std::slice::from_ref(&tile));

        assert_eq!(index.len(), 4);
        for side in Side::ALL {
            assert_eq!(
                index.candidates(tile.fingerprint(side)),
                &[IndexEntry { tile: 0, side }]
            );
        }
    }

    // Identical borders share one key; entries keep tile-then-side order
    #[test]
    fn test_collisions_keep_insertion_order() {
        let tiles = vec![
            Tile::new(0, solid_image(5, 5, 80)),
            Tile::new(1, solid_image(5, 5, 80)),
        ];
        let index = MatchIndex::build(&tiles);
        let fingerprint = tiles[0].fingerprint(Side::Left);

        let entries: Vec<(usize, Side)> = index
            .candidates(fingerprint)
            .iter()
            .map(|entry| (entry.tile, entry.side))
            .collect();
        assert_eq!(
            entries,
            vec![
                (0, Side::Left),
                (0, Side::Right),
                (0, Side::Top),
                (0, Side::Bottom),
                (1, Side::Left),
                (1, Side::Right),
                (1, Side::Top),
                (1, Side::Bottom),
            ]
        );
        assert_eq!(index.len(), 1);
        assert_eq!(index.ambiguous(), 1);
    }

    #[test]
    fn test_facing_filters_by_side() {
        let tiles = vec![
            Tile::new(0, solid_image(5, 5, 80)),
            Tile::new(1, noise_image(5, 5, 2)),
            Tile::new(2, solid_image(5, 5, 80)),
        ];
        let index = MatchIndex::build(&tiles);
        let fingerprint = tiles[0].fingerprint(Side::Right);

        let left: Vec<usize> = index.facing(fingerprint, Side::Left).collect();
        assert_eq!(left, vec![0, 2]);
        assert_eq!(index.facing(tiles[1].fingerprint(Side::Top), Side::Top).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_distinct_tiles_are_not_ambiguous() {
        let tiles = vec![
            Tile::new(0, noise_image(6, 6, 3)),
            Tile::new(1, noise_image(6, 6, 4)),
        ];
        assert_eq!(MatchIndex::build(&tiles).ambiguous(), 0);
    }
}
