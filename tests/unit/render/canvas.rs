//! Tests for seam-aware tile origins and parallel stitching

#[cfg(test)]
mod tests {
    use crate::fixtures::{cut_noise, noise_image, pool, small_geometry, solid_image};
    use image::Rgb;
    use tilestitch::io::configuration::TileGeometry;
    use tilestitch::parallel::WorkerPool;
    use tilestitch::puzzle::anchor::detect_anchors;
    use tilestitch::puzzle::assembler::assemble;
    use tilestitch::puzzle::tile::{GridPos, Tile};
    use tilestitch::render::canvas::{Canvas, StitchReport, TileRect};

    #[test]
    fn test_tile_origin_seam_rule() {
        let canvas = Canvas::new(1, 1, [0; 3], TileGeometry::default());

        assert_eq!(canvas.tile_origin(GridPos::ORIGIN), (0, 0));
        assert_eq!(canvas.tile_origin(GridPos::new(2, 0)), (479, 0));
        assert_eq!(canvas.tile_origin(GridPos::new(1, 1)), (239, 134));
        assert_eq!(canvas.tile_origin(GridPos::new(15, 15)), (3599, 2024));
    }

    #[test]
    fn test_tile_rect_skips_unplaced_and_out_of_bounds() {
        let canvas = Canvas::new(12, 10, [0; 3], small_geometry(2));
        let unplaced = Tile::new(0, solid_image(7, 6, 0));
        let mut outside = Tile::new(1, solid_image(7, 6, 0));
        outside.place(GridPos::new(2, 0));
        let mut inside = Tile::new(2, solid_image(7, 6, 0));
        inside.place(GridPos::new(1, 1));

        assert_eq!(canvas.tile_rect(&unplaced), None);
        assert_eq!(canvas.tile_rect(&outside), None);
        assert_eq!(
            canvas.tile_rect(&inside),
            Some(TileRect {
                tile: 2,
                x: 5,
                y: 4,
                width: 7,
                height: 6,
            })
        );
    }

    // Four assembled quadrants reproduce the source without gaps or overlap
    #[test]
    fn test_stitch_reproduces_source() {
        let geometry = small_geometry(2);
        let (source, mut tiles) = cut_noise(&geometry, 31);
        detect_anchors(&mut tiles, &geometry).expect("sizes are valid");
        assemble(&mut tiles, geometry.grid_size);

        let (width, height) = geometry.natural_size();
        let mut canvas = Canvas::new(width, height, [0; 3], geometry);
        let report = canvas.stitch(&tiles, &pool());

        assert_eq!(
            report,
            StitchReport {
                drawn: 4,
                skipped: 0,
                clipped: 0,
            }
        );
        assert_eq!(canvas.image(), &source);
    }

    // Band boundaries that cut through tiles do not change the result
    #[test]
    fn test_stitch_is_independent_of_worker_count() {
        let geometry = small_geometry(3);
        let (source, mut tiles) = cut_noise(&geometry, 32);
        detect_anchors(&mut tiles, &geometry).expect("sizes are valid");
        assemble(&mut tiles, geometry.grid_size);
        let (width, height) = geometry.natural_size();

        for workers in [1, 3, 7] {
            let pool = WorkerPool::new(Some(workers)).expect("pool starts");
            let mut canvas = Canvas::new(width, height, [0; 3], geometry);
            canvas.stitch(&tiles, &pool);
            assert_eq!(canvas.into_image(), source, "{workers} workers");
        }
    }

    #[test]
    fn test_unplaced_tile_is_absent_from_canvas() {
        let geometry = small_geometry(2);
        let (source, mut tiles) = cut_noise(&geometry, 33);
        tiles.push(Tile::new(4, noise_image(7, 6, 34)));
        detect_anchors(&mut tiles, &geometry).expect("sizes are valid");
        assemble(&mut tiles, geometry.grid_size);

        let (width, height) = geometry.natural_size();
        let mut canvas = Canvas::new(width, height, [0; 3], geometry);
        let report = canvas.stitch(&tiles, &pool());

        assert_eq!(report.drawn, 4);
        assert_eq!(report.skipped, 1);
        assert_eq!(canvas.image(), &source);
    }

    #[test]
    fn test_empty_cells_keep_background() {
        let geometry = small_geometry(2);
        let mut corner = Tile::new(0, solid_image(6, 5, 200));
        corner.place(GridPos::ORIGIN);

        let mut canvas = Canvas::new(12, 10, [1, 2, 3], geometry);
        canvas.stitch(std::slice::from_ref(&corner), &pool());

        assert_eq!(canvas.image().get_pixel(0, 0), &Rgb([200, 200, 200]));
        assert_eq!(canvas.image().get_pixel(5, 4), &Rgb([200, 200, 200]));
        assert_eq!(canvas.image().get_pixel(6, 0), &Rgb([1, 2, 3]));
        assert_eq!(canvas.image().get_pixel(11, 9), &Rgb([1, 2, 3]));
    }

    // Tiles reaching past the canvas edge are clipped instead of failing
    #[test]
    fn test_oversized_tile_is_clipped() {
        let geometry = small_geometry(2);
        let mut tile = Tile::new(0, solid_image(7, 6, 90));
        tile.place(GridPos::new(1, 1));

        let mut canvas = Canvas::new(8, 8, [0; 3], geometry);
        let report = canvas.stitch(std::slice::from_ref(&tile), &pool());

        assert_eq!(report.clipped, 1);
        assert_eq!(canvas.image().get_pixel(7, 7), &Rgb([90, 90, 90]));
        assert_eq!(canvas.image().get_pixel(4, 3), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_empty_canvas_stitch_is_noop() {
        let mut tile = Tile::new(0, solid_image(6, 5, 1));
        tile.place(GridPos::ORIGIN);
        let mut canvas = Canvas::new(0, 0, [0; 3], small_geometry(2));

        let report = canvas.stitch(std::slice::from_ref(&tile), &pool());
        assert_eq!(report.drawn, 1);
        assert_eq!(report.clipped, 1);
    }
}
