//! Tests for the occupancy grid built after assembly

#[cfg(test)]
mod tests {
    use crate::fixtures::{cut_noise, small_geometry, solid_image};
    use tilestitch::puzzle::anchor::detect_anchors;
    use tilestitch::puzzle::assembler::assemble;
    use tilestitch::puzzle::layout::Layout;
    use tilestitch::puzzle::tile::{GridPos, Tile};

    fn placed(id: usize, column: i32, row: i32) -> Tile {
        let mut tile = Tile::new(id, solid_image(3, 3, id as u8));
        tile.place(GridPos::new(column, row));
        tile
    }

    #[test]
    fn test_complete_grid_layout() {
        let geometry = small_geometry(2);
        let (_, mut tiles) = cut_noise(&geometry, 21);
        detect_anchors(&mut tiles, &geometry).expect("sizes are valid");
        assemble(&mut tiles, geometry.grid_size);

        let layout = Layout::from_tiles(&tiles, geometry.grid_size);

        assert!(layout.is_complete());
        assert_eq!(layout.filled(), 4);
        assert!((layout.coverage() - 1.0).abs() < f64::EPSILON);
        assert_eq!(layout.tile_at(GridPos::new(1, 0)), Some(1));
        assert_eq!(layout.tile_at(GridPos::new(0, 1)), Some(2));
        assert!(layout.missing_cells().is_empty());
    }

    #[test]
    fn test_layout_sorts_out_problem_tiles() {
        let tiles = vec![
            placed(0, 0, 0),
            placed(1, 0, 0),
            placed(2, 3, 0),
            Tile::new(3, solid_image(3, 3, 0)),
        ];

        let layout = Layout::from_tiles(&tiles, 2);

        assert_eq!(layout.tile_at(GridPos::ORIGIN), Some(0));
        assert_eq!(layout.conflicts, vec![(1, GridPos::ORIGIN)]);
        assert_eq!(layout.out_of_bounds, vec![2]);
        assert_eq!(layout.unplaced, vec![3]);
        assert!(!layout.is_complete());
        assert!((layout.coverage() - 0.25).abs() < f64::EPSILON);
        assert_eq!(
            layout.missing_cells(),
            vec![GridPos::new(1, 0), GridPos::new(0, 1), GridPos::new(1, 1)]
        );
    }

    #[test]
    fn test_tile_at_outside_grid_is_none() {
        let layout = Layout::from_tiles(&[placed(0, 0, 0)], 1);
        assert_eq!(layout.tile_at(GridPos::new(-1, 0)), None);
        assert_eq!(layout.tile_at(GridPos::new(0, 5)), None);
    }

    #[test]
    fn test_empty_grid_has_zero_coverage() {
        let layout = Layout::from_tiles(&[], 0);
        assert_eq!(layout.filled(), 0);
        assert!(layout.coverage().abs() < f64::EPSILON);
    }
}
