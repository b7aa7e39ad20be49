//! Tile directory listing and parallel decoding

use crate::io::error::{Result, WithPath};
use crate::parallel::pool::WorkerPool;
use crate::puzzle::tile::Tile;
use image::ImageFormat;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Image files directly inside `dir`, sorted by path
///
/// Entries whose extension no decoder recognises (and subdirectories) are
/// skipped. Sorting makes tile ids independent of filesystem order.
///
/// # Errors
///
/// Returns an error if the directory or one of its entries cannot be read
pub fn list_tile_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_path(dir, "read directory")? {
        let path = entry.with_path(dir, "read directory entry")?.path();
        if path.is_file() && ImageFormat::from_path(&path).is_ok() {
            files.push(path);
        } else {
            log::debug!("skipping non-image entry {}", path.display());
        }
    }
    files.sort();
    Ok(files)
}

/// Decode one tile file and fingerprint it
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_tile(id: usize, path: &Path) -> Result<Tile> {
    let pixels = image::open(path).with_path(path, "decode")?.to_rgb8();
    Ok(Tile::new(id, pixels).with_source(path))
}

/// Decode and fingerprint every file on the pool, keeping path order
///
/// Tile ids are the positions in `paths`.
///
/// # Errors
///
/// Returns the first decode error in path order
pub fn load_tiles(paths: &[PathBuf], pool: &WorkerPool, progress: &ProgressBar) -> Result<Vec<Tile>> {
    pool.try_map(paths.len(), |id| {
        let tile = match paths.get(id) {
            Some(path) => load_tile(id, path),
            None => Err(crate::io::error::invalid_parameter(
                "tile",
                &id,
                &"index outside the listed files",
            )),
        };
        progress.inc(1);
        tile
    })
}

/// List and load every tile in `dir`
///
/// # Errors
///
/// Returns an error if listing or decoding fails
pub fn load_directory(dir: &Path, pool: &WorkerPool, progress: &ProgressBar) -> Result<Vec<Tile>> {
    let paths = list_tile_files(dir)?;
    progress.set_length(paths.len() as u64);
    log::info!("found {} tile files in {}", paths.len(), dir.display());
    load_tiles(&paths, pool, progress)
}
