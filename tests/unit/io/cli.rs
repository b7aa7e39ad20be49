//! Tests for argument parsing and the end-to-end processor

#[cfg(test)]
mod tests {
    use crate::fixtures::{cut_noise, noise_image, small_geometry, solid_image};
    use clap::Parser;
    use std::path::{Path, PathBuf};
    use tilestitch::PuzzleError;
    use tilestitch::io::cli::{Cli, Command, CutArgs, GeometryArgs, PuzzleProcessor, cut};
    use tilestitch::io::configuration::{
        DEFAULT_CANVAS_WIDTH, DEFAULT_GRID_SIZE, DEFAULT_QUALITY, PuzzleConfig, TileGeometry,
    };
    use tilestitch::render::cutter::{cut_tiles, write_shuffled};

    fn small_config(input_dir: &Path, output: PathBuf, geometry: TileGeometry) -> PuzzleConfig {
        let (canvas_width, canvas_height) = geometry.natural_size();
        PuzzleConfig {
            output,
            geometry,
            canvas_width,
            canvas_height,
            threads: Some(2),
            ..PuzzleConfig::new(input_dir)
        }
    }

    fn write_images(dir: &Path, images: &[image::RgbImage]) {
        for (i, image) in images.iter().enumerate() {
            image
                .save(dir.join(format!("piece_{i}.png")))
                .expect("fixture written");
        }
    }

    #[test]
    fn test_assemble_defaults() {
        let cli = Cli::try_parse_from(["tilestitch", "assemble", "tiles"]).expect("valid args");
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);

        let Command::Assemble(args) = cli.command else {
            panic!("expected assemble");
        };
        let config = args.to_config();
        assert_eq!(config.input_dir, PathBuf::from("tiles"));
        assert_eq!(config.output, PathBuf::from("result.jpg"));
        assert_eq!(config.geometry, TileGeometry::default());
        assert_eq!(config.geometry.grid_size, DEFAULT_GRID_SIZE);
        assert_eq!(config.canvas_width, DEFAULT_CANVAS_WIDTH);
        assert_eq!(config.quality, DEFAULT_QUALITY);
        assert_eq!(config.threads, None);
        assert!(config.check_tile_count);
    }

    #[test]
    fn test_assemble_overrides() {
        let cli = Cli::try_parse_from([
            "tilestitch",
            "assemble",
            "in",
            "-o",
            "out.png",
            "-g",
            "4",
            "--first-col-width",
            "10",
            "--tile-width",
            "11",
            "--quality",
            "95",
            "-t",
            "3",
            "--no-count-check",
            "-vv",
        ])
        .expect("valid args");
        assert_eq!(cli.verbose, 2);

        let Command::Assemble(args) = cli.command else {
            panic!("expected assemble");
        };
        let config = args.to_config();
        assert_eq!(config.output, PathBuf::from("out.png"));
        assert_eq!(config.geometry.grid_size, 4);
        assert_eq!(config.geometry.first_col_width, 10);
        assert_eq!(config.geometry.tile_width, 11);
        assert_eq!(config.quality, 95);
        assert_eq!(config.threads, Some(3));
        assert!(!config.check_tile_count);
    }

    #[test]
    fn test_quiet_hides_progress() {
        let cli = Cli::try_parse_from(["tilestitch", "-q", "cut", "a.png", "out"])
            .expect("valid args");
        assert!(!cli.should_show_progress());
        assert!(matches!(cli.command, Command::Cut(CutArgs { seed: 42, .. })));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["tilestitch"]).is_err());
        assert!(Cli::try_parse_from(["tilestitch", "assemble"]).is_err());
    }

    #[test]
    fn test_cut_command_writes_tiles() {
        let dir = tempfile::tempdir().expect("temp dir");
        let geometry = small_geometry(2);
        let (width, height) = geometry.natural_size();
        let source_path = dir.path().join("source.png");
        noise_image(width, height, 41)
            .save(&source_path)
            .expect("source written");

        let args = CutArgs {
            source: source_path,
            output_dir: dir.path().join("tiles"),
            seed: 1,
            geometry: GeometryArgs {
                grid_size: 2,
                first_col_width: 6,
                first_row_height: 5,
                tile_width: 7,
                tile_height: 6,
            },
        };
        let paths = cut(&args).expect("cut succeeds");

        assert_eq!(paths.len(), 4);
        assert!(paths.iter().all(|path| path.starts_with(dir.path().join("tiles"))));
    }

    #[test]
    fn test_cut_command_missing_source() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = CutArgs {
            source: dir.path().join("absent.png"),
            output_dir: dir.path().join("tiles"),
            seed: 1,
            geometry: GeometryArgs {
                grid_size: 2,
                first_col_width: 6,
                first_row_height: 5,
                tile_width: 7,
                tile_height: 6,
            },
        };
        assert!(matches!(cut(&args), Err(PuzzleError::TileLoad { .. })));
    }

    #[test]
    fn test_process_reconstructs_shuffled_tiles() {
        let dir = tempfile::tempdir().expect("temp dir");
        let geometry = small_geometry(3);
        let (source, _) = cut_noise(&geometry, 42);
        let cuts = cut_tiles(&source, &geometry).expect("source fits");
        let tile_dir = dir.path().join("tiles");
        write_shuffled(&cuts, &tile_dir, 5).expect("tiles written");

        let output = dir.path().join("out").join("result.png");
        let mut processor =
            PuzzleProcessor::new(small_config(&tile_dir, output.clone(), geometry), false);
        let summary = processor.process().expect("run succeeds");

        assert_eq!(summary.tiles, 9);
        assert!(summary.layout.is_complete());
        assert_eq!(summary.assembly.placed, 8);
        assert_eq!(summary.stitch.drawn, 9);
        let names: Vec<&str> = summary.phases.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["load", "assemble", "stitch", "write"]);

        let written = image::open(&output).expect("output decodes").to_rgb8();
        assert_eq!(written, source);
    }

    #[test]
    fn test_process_rejects_wrong_tile_count() {
        let dir = tempfile::tempdir().expect("temp dir");
        let geometry = small_geometry(2);
        let (_, tiles) = cut_noise(&geometry, 43);
        let images: Vec<_> = tiles.iter().take(3).map(|tile| tile.pixels().clone()).collect();
        write_images(dir.path(), &images);

        let config = small_config(dir.path(), dir.path().join("out.png"), geometry);
        let result = PuzzleProcessor::new(config, false).process();

        assert!(matches!(
            result,
            Err(PuzzleError::TileCountMismatch {
                expected: 4,
                found: 3
            })
        ));
        assert!(!dir.path().join("out.png").exists());
    }

    // Without the count check a missing tile leaves its cell as background
    #[test]
    fn test_process_tolerates_missing_tile_when_unchecked() {
        let dir = tempfile::tempdir().expect("temp dir");
        let geometry = small_geometry(2);
        let (_, tiles) = cut_noise(&geometry, 44);
        let images: Vec<_> = tiles.iter().take(3).map(|tile| tile.pixels().clone()).collect();
        write_images(dir.path(), &images);

        let output = dir.path().join("out.png");
        let mut config = small_config(dir.path(), output.clone(), geometry);
        config.check_tile_count = false;
        config.background = [7, 7, 7];
        let summary = PuzzleProcessor::new(config, false)
            .process()
            .expect("run succeeds");

        assert_eq!(summary.layout.filled(), 3);
        assert_eq!(summary.layout.missing_cells().len(), 1);
        let written = image::open(&output).expect("output decodes").to_rgb8();
        assert_eq!(written.get_pixel(11, 9), &image::Rgb([7, 7, 7]));
    }

    #[test]
    fn test_process_without_corner_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let images: Vec<_> = (0..4).map(|i| solid_image(7, 6, i * 40)).collect();
        write_images(dir.path(), &images);

        let config = small_config(dir.path(), dir.path().join("out.png"), small_geometry(2));
        let result = PuzzleProcessor::new(config, false).process();

        assert!(matches!(
            result,
            Err(PuzzleError::NoAnchor {
                first_col_width: 6,
                first_row_height: 5
            })
        ));
    }

    #[test]
    fn test_process_rejects_odd_tile_size() {
        let dir = tempfile::tempdir().expect("temp dir");
        let images = vec![
            solid_image(6, 5, 0),
            solid_image(7, 5, 0),
            solid_image(6, 6, 0),
            solid_image(3, 3, 0),
        ];
        write_images(dir.path(), &images);

        let config = small_config(dir.path(), dir.path().join("out.png"), small_geometry(2));
        let result = PuzzleProcessor::new(config, false).process();

        assert!(matches!(
            result,
            Err(PuzzleError::UnexpectedTileSize {
                tile: 3,
                width: 3,
                height: 3
            })
        ));
    }

    #[test]
    fn test_process_validates_before_reading() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = PuzzleConfig::new(dir.path().join("missing"));
        config.quality = 0;

        let mut processor = PuzzleProcessor::new(config, false);
        assert_eq!(processor.config().quality, 0);
        assert!(matches!(
            processor.process(),
            Err(PuzzleError::InvalidParameter {
                parameter: "quality",
                ..
            })
        ));
    }
}
