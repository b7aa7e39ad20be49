//! Command-line interface and run orchestration

use crate::io::configuration::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_FIRST_COL_WIDTH,
    DEFAULT_FIRST_ROW_HEIGHT, DEFAULT_GRID_SIZE, DEFAULT_OUTPUT, DEFAULT_QUALITY, DEFAULT_SEED,
    DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH, PuzzleConfig, TileGeometry,
};
use crate::io::error::{PuzzleError, Result, WithPath};
use crate::io::image::save_canvas;
use crate::io::loader::load_directory;
use crate::io::progress::ProgressManager;
use crate::io::timing::PhaseTimer;
use crate::parallel::pool::WorkerPool;
use crate::puzzle::anchor::detect_anchors;
use crate::puzzle::assembler::{Assembler, AssemblyReport};
use crate::puzzle::index::MatchIndex;
use crate::puzzle::layout::Layout;
use crate::puzzle::tile::Tile;
use crate::render::canvas::{Canvas, StitchReport};
use crate::render::cutter::{cut_tiles, write_shuffled};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "tilestitch")]
#[command(
    author,
    version,
    about = "Reassemble a grid-cut image from unordered tiles"
)]
/// Command-line arguments for the tile stitcher
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress bars and informational logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log detail (repeat for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reassemble tiles from a directory into one image
    Assemble(AssembleArgs),
    /// Cut an image into shuffled tiles
    Cut(CutArgs),
}

/// Tile and grid sizes shared by both subcommands
#[derive(Args, Debug, Clone)]
pub struct GeometryArgs {
    /// Tiles per grid side
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    pub grid_size: usize,

    /// Width of first-column tiles
    #[arg(long, default_value_t = DEFAULT_FIRST_COL_WIDTH)]
    pub first_col_width: u32,

    /// Height of first-row tiles
    #[arg(long, default_value_t = DEFAULT_FIRST_ROW_HEIGHT)]
    pub first_row_height: u32,

    /// Width of all other tiles
    #[arg(long, default_value_t = DEFAULT_TILE_WIDTH)]
    pub tile_width: u32,

    /// Height of all other tiles
    #[arg(long, default_value_t = DEFAULT_TILE_HEIGHT)]
    pub tile_height: u32,
}

impl GeometryArgs {
    /// Geometry described by the arguments
    pub const fn geometry(&self) -> TileGeometry {
        TileGeometry {
            grid_size: self.grid_size,
            first_col_width: self.first_col_width,
            first_row_height: self.first_row_height,
            tile_width: self.tile_width,
            tile_height: self.tile_height,
        }
    }
}

/// Arguments of `assemble`
#[derive(Args, Debug, Clone)]
pub struct AssembleArgs {
    /// Directory holding the tile images
    #[arg(value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Output image; the extension selects the format
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Lossy encoder quality (1-100)
    #[arg(long, default_value_t = DEFAULT_QUALITY)]
    pub quality: u8,

    /// Canvas width in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH)]
    pub canvas_width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
    pub canvas_height: u32,

    /// Worker threads (defaults to one per core)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Accept a tile count that differs from the grid cell count
    #[arg(long)]
    pub no_count_check: bool,

    /// Grid and tile sizes
    #[command(flatten)]
    pub geometry: GeometryArgs,
}

impl AssembleArgs {
    /// Run configuration described by the arguments
    pub fn to_config(&self) -> PuzzleConfig {
        PuzzleConfig {
            output: self.output.clone(),
            geometry: self.geometry.geometry(),
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            quality: self.quality,
            threads: self.threads,
            check_tile_count: !self.no_count_check,
            ..PuzzleConfig::new(&self.input_dir)
        }
    }
}

/// Arguments of `cut`
#[derive(Args, Debug, Clone)]
pub struct CutArgs {
    /// Image to cut
    #[arg(value_name = "IMAGE")]
    pub source: PathBuf,

    /// Directory receiving the tiles
    #[arg(value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Seed for the file name shuffle
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Grid and tile sizes
    #[command(flatten)]
    pub geometry: GeometryArgs,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Command::Assemble(args) => {
                let mut processor =
                    PuzzleProcessor::new(args.to_config(), self.should_show_progress());
                processor.process().map(|_| ())
            }
            Command::Cut(args) => cut(args).map(|_| ()),
        }
    }
}

/// Cut `args.source` into shuffled tile files
///
/// # Errors
///
/// Returns an error if the source cannot be decoded, does not fit the
/// geometry, or the tiles cannot be written
pub fn cut(args: &CutArgs) -> Result<Vec<PathBuf>> {
    let source = image::open(&args.source)
        .with_path(&args.source, "decode")?
        .to_rgb8();
    let tiles = cut_tiles(&source, &args.geometry.geometry())?;
    write_shuffled(&tiles, &args.output_dir, args.seed)
}

/// What an assembly run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Tiles loaded from the input directory
    pub tiles: usize,
    /// Traversal statistics
    pub assembly: AssemblyReport,
    /// Final arrangement
    pub layout: Layout,
    /// Canvas statistics
    pub stitch: StitchReport,
    /// Duration of each phase in order
    pub phases: Vec<(&'static str, Duration)>,
    /// Duration of the whole run
    pub total: Duration,
}

/// Orchestrates one load → assemble → stitch → write run
pub struct PuzzleProcessor {
    config: PuzzleConfig,
    progress: ProgressManager,
}

impl PuzzleProcessor {
    /// Create a processor for `config`
    pub fn new(config: PuzzleConfig, show_progress: bool) -> Self {
        Self {
            config,
            progress: ProgressManager::new(show_progress),
        }
    }

    /// Configuration in use
    pub const fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Run every phase and write the output image
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid or the worker pool cannot start
    /// - A tile cannot be listed or decoded
    /// - The tile count differs from the grid cell count (when checked)
    /// - A tile has a size outside both size categories
    /// - No corner anchor tile exists
    /// - The output image cannot be written
    pub fn process(&mut self) -> Result<RunSummary> {
        self.config.validate()?;
        let geometry = self.config.geometry;
        let pool = WorkerPool::new(self.config.threads)?;
        let mut timer = PhaseTimer::new();

        let mut tiles = self.load(&pool)?;
        let anchors = detect_anchors(&mut tiles, &geometry)?;
        log::debug!("anchors: {anchors:?}");
        if anchors.corners == 0 {
            return Err(PuzzleError::NoAnchor {
                first_col_width: geometry.first_col_width,
                first_row_height: geometry.first_row_height,
            });
        }
        timer.lap("load");

        let assembly = Self::assemble(&mut tiles, geometry.grid_size);
        let layout = Layout::from_tiles(&tiles, geometry.grid_size);
        log::info!(
            "placed {}/{} cells ({:.1}% coverage), {} tiles unplaced",
            layout.filled(),
            geometry.cell_count(),
            layout.coverage() * 100.0,
            layout.unplaced.len()
        );
        timer.lap("assemble");

        let (canvas, stitch) = self.stitch(&tiles, &pool);
        timer.lap("stitch");

        save_canvas(canvas.image(), &self.config.output, self.config.quality)?;
        timer.lap("write");
        self.progress.finish();

        Ok(RunSummary {
            tiles: tiles.len(),
            assembly,
            layout,
            stitch,
            phases: timer.laps().to_vec(),
            total: timer.finish(),
        })
    }

    fn load(&mut self, pool: &WorkerPool) -> Result<Vec<Tile>> {
        let bar = self.progress.start_phase("load", 0);
        let tiles = load_directory(&self.config.input_dir, pool, &bar)?;
        ProgressManager::finish_phase(&bar, "decoded");

        let expected = self.config.geometry.cell_count();
        if tiles.len() != expected {
            if self.config.check_tile_count {
                return Err(PuzzleError::TileCountMismatch {
                    expected,
                    found: tiles.len(),
                });
            }
            log::debug!("{} tiles for {expected} cells", tiles.len());
        }
        Ok(tiles)
    }

    fn assemble(tiles: &mut [Tile], grid_size: usize) -> AssemblyReport {
        let index = MatchIndex::build(tiles);
        log::debug!(
            "match index: {} fingerprints, {} ambiguous",
            index.len(),
            index.ambiguous()
        );
        Assembler::new(&index, grid_size).run(tiles)
    }

    fn stitch(&mut self, tiles: &[Tile], pool: &WorkerPool) -> (Canvas, StitchReport) {
        let geometry = self.config.geometry;
        let bar = self.progress.start_phase("stitch", tiles.len());
        let mut canvas = Canvas::new(
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.background,
            geometry,
        );
        let report = canvas.stitch(tiles, pool);
        bar.set_position(report.drawn as u64);
        ProgressManager::finish_phase(&bar, "composited");
        if report.clipped > 0 {
            log::debug!("{} tiles extend past the canvas edge", report.clipped);
        }
        (canvas, report)
    }
}
