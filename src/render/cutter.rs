//! Cutting a source image into shuffled tiles
//!
//! Produces exactly the tile set the assembler expects: the first column
//! and row use their own sizes, every other cell starts on the previous
//! cell's last pixel so neighbours share a seam.

use crate::io::configuration::{TILE_FILE_PREFIX, TileGeometry};
use crate::io::error::{PuzzleError, Result, WithPath};
use crate::puzzle::tile::GridPos;
use image::{RgbImage, imageops};
use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};

/// One cut tile and the cell it came from
#[derive(Debug, Clone)]
pub struct CutTile {
    /// Cell in the source grid
    pub pos: GridPos,
    /// Cropped pixels
    pub pixels: RgbImage,
}

/// Crop every grid cell out of `source`, in row-major order
///
/// # Errors
///
/// Returns an error if the geometry is invalid or `source` is smaller than
/// the area the grid covers
pub fn cut_tiles(source: &RgbImage, geometry: &TileGeometry) -> Result<Vec<CutTile>> {
    geometry.validate()?;
    let (needed_width, needed_height) = geometry.natural_size();
    if source.width() < needed_width || source.height() < needed_height {
        return Err(PuzzleError::InvalidSourceData {
            reason: format!(
                "source is {}x{} but the grid needs at least {needed_width}x{needed_height}",
                source.width(),
                source.height()
            ),
        });
    }

    let mut tiles = Vec::with_capacity(geometry.cell_count());
    for row in 0..geometry.grid_size {
        for column in 0..geometry.grid_size {
            let pos = GridPos::new(column as i32, row as i32);
            let (x, y) = geometry.origin(pos.column, pos.row);
            let (width, height) = geometry.cell_size(column, row);
            let pixels = imageops::crop_imm(source, x as u32, y as u32, width, height).to_image();
            tiles.push(CutTile { pos, pixels });
        }
    }
    Ok(tiles)
}

/// Write tiles as PNG files in a seeded random order
///
/// File names are `tile_NNNN.png` numbered by shuffled position, so they
/// carry nothing about the grid. Returns the written paths in tile order.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot be
/// written
pub fn write_shuffled(tiles: &[CutTile], dir: &Path, seed: u64) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_path(dir, "create directory")?;

    let mut order: Vec<usize> = (0..tiles.len()).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));

    let digits = tiles.len().to_string().len().max(4);
    let mut paths = Vec::with_capacity(tiles.len());
    for (tile, slot) in tiles.iter().zip(&order) {
        let path = dir.join(format!("{TILE_FILE_PREFIX}{slot:0digits$}.png"));
        tile.pixels.save(&path).with_path(&path, "write")?;
        paths.push(path);
    }

    log::info!("wrote {} tiles to {}", paths.len(), dir.display());
    Ok(paths)
}
