//! Reconstruction constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};
use std::path::PathBuf;

/// Number of tiles along each side of the grid
pub const DEFAULT_GRID_SIZE: usize = 16;

/// Width of every tile in the first column
pub const DEFAULT_FIRST_COL_WIDTH: u32 = 240;
/// Height of every tile in the first row
pub const DEFAULT_FIRST_ROW_HEIGHT: u32 = 135;

// Interior tiles carry the shared seam pixel on their leading edge
/// Width of tiles outside the first column
pub const DEFAULT_TILE_WIDTH: u32 = DEFAULT_FIRST_COL_WIDTH + 1;
/// Height of tiles outside the first row
pub const DEFAULT_TILE_HEIGHT: u32 = DEFAULT_FIRST_ROW_HEIGHT + 1;

/// Output canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 3840;
/// Output canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 2160;

/// JPEG quality used when persisting the canvas
pub const DEFAULT_QUALITY: u8 = 80;
/// Output path when none is given
pub const DEFAULT_OUTPUT: &str = "result.jpg";
/// Canvas fill for cells no tile covers
pub const DEFAULT_BACKGROUND: [u8; 3] = [0, 0, 0];

/// Fixed seed for reproducible tile shuffling
pub const DEFAULT_SEED: u64 = 42;

/// Added to every quantised intensity when folding a border
pub const HASH_MAGIC_NUMBER: u64 = 0x9e37_9967;
/// Intensity quantisation step applied before hashing
pub const INTENSITY_QUANTUM: u8 = 10;

/// File name prefix for tiles written by the cutter
pub const TILE_FILE_PREFIX: &str = "tile_";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Pixel geometry of a cut grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGeometry {
    /// Tiles per grid side; also the grid bound for assembly
    pub grid_size: usize,
    /// Width of first-column tiles
    pub first_col_width: u32,
    /// Height of first-row tiles
    pub first_row_height: u32,
    /// Width of all other tiles
    pub tile_width: u32,
    /// Height of all other tiles
    pub tile_height: u32,
}

impl Default for TileGeometry {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            first_col_width: DEFAULT_FIRST_COL_WIDTH,
            first_row_height: DEFAULT_FIRST_ROW_HEIGHT,
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
        }
    }
}

impl TileGeometry {
    /// Number of cells in the grid
    pub const fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Pixel origin of the cell at `(column, row)`
    ///
    /// Every cell after the first starts one pixel early so neighbours share
    /// their seam column/row.
    pub fn origin(&self, column: i32, row: i32) -> (i64, i64) {
        let x = i64::from(self.first_col_width) * i64::from(column) - i64::from(column > 0);
        let y = i64::from(self.first_row_height) * i64::from(row) - i64::from(row > 0);
        (x, y)
    }

    /// Pixel size of the cell at `(column, row)`
    pub const fn cell_size(&self, column: usize, row: usize) -> (u32, u32) {
        let width = if column == 0 {
            self.first_col_width
        } else {
            self.tile_width
        };
        let height = if row == 0 {
            self.first_row_height
        } else {
            self.tile_height
        };
        (width, height)
    }

    /// Smallest image that holds the whole grid
    pub fn natural_size(&self) -> (u32, u32) {
        let last = self.grid_size.saturating_sub(1) as i32;
        let (x, y) = self.origin(last, last);
        let (width, height) = self.cell_size(last as usize, last as usize);
        (
            (x + i64::from(width)).max(0) as u32,
            (y + i64::from(height)).max(0) as u32,
        )
    }

    /// Check the geometry describes a usable grid
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, a size is zero, or an interior
    /// tile is not wider/taller than the shared seam
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(invalid_parameter(
                "grid_size",
                &self.grid_size,
                &"grid must contain at least one cell",
            ));
        }
        if i32::try_from(self.grid_size).is_err() {
            return Err(invalid_parameter(
                "grid_size",
                &self.grid_size,
                &"grid coordinates must fit in i32",
            ));
        }
        if self.first_col_width == 0 || self.first_row_height == 0 {
            return Err(invalid_parameter(
                "first_tile",
                &format!("{}x{}", self.first_col_width, self.first_row_height),
                &"first row/column tiles must have a non-zero size",
            ));
        }
        if self.tile_width < 2 || self.tile_height < 2 {
            return Err(invalid_parameter(
                "tile",
                &format!("{}x{}", self.tile_width, self.tile_height),
                &"interior tiles must be at least 2x2 to carry a seam",
            ));
        }
        Ok(())
    }
}

/// Settings for one assembly run
#[derive(Debug, Clone)]
pub struct PuzzleConfig {
    /// Directory holding the tile images
    pub input_dir: PathBuf,
    /// Path of the composited image
    pub output: PathBuf,
    /// Grid and tile sizes
    pub geometry: TileGeometry,
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Canvas fill colour
    pub background: [u8; 3],
    /// Lossy encoder quality (1-100)
    pub quality: u8,
    /// Worker threads; `None` uses one per available core
    pub threads: Option<usize>,
    /// Reject inputs whose tile count differs from the grid cell count
    pub check_tile_count: bool,
}

impl PuzzleConfig {
    /// Configuration with all defaults for the given input directory
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            geometry: TileGeometry::default(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            background: DEFAULT_BACKGROUND,
            quality: DEFAULT_QUALITY,
            threads: None,
            check_tile_count: true,
        }
    }

    /// Check every parameter before any work starts
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry is invalid, the canvas is empty,
    /// the quality is outside 1-100, or zero threads are requested
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(invalid_parameter(
                "canvas",
                &format!("{}x{}", self.canvas_width, self.canvas_height),
                &"canvas must have a non-zero size",
            ));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(invalid_parameter(
                "quality",
                &self.quality,
                &"must be between 1 and 100",
            ));
        }
        if self.threads == Some(0) {
            return Err(invalid_parameter(
                "threads",
                &0,
                &"at least one worker thread is required",
            ));
        }
        Ok(())
    }
}
