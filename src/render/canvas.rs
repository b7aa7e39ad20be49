//! Canvas composition of placed tiles
//!
//! Tiles are copied to the pixel origin their grid coordinate implies. Every
//! cell after the first row/column starts one pixel early so neighbouring
//! tiles overlap exactly on their shared seam.

use crate::io::configuration::TileGeometry;
use crate::parallel::pool::WorkerPool;
use crate::puzzle::tile::{GridPos, Tile};
use image::{Rgb, RgbImage};
use rayon::prelude::*;

const CHANNELS: usize = 3;

/// Pixel rectangle a placed tile covers on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    /// Tile index
    pub tile: usize,
    /// Left edge, may be negative for malformed geometry
    pub x: i64,
    /// Top edge
    pub y: i64,
    /// Tile width
    pub width: u32,
    /// Tile height
    pub height: u32,
}

/// Outcome of a stitch pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StitchReport {
    /// Tiles copied onto the canvas
    pub drawn: usize,
    /// Tiles left out because they are unplaced or outside the grid bound
    pub skipped: usize,
    /// Drawn tiles that extend past the canvas edge and were clipped
    pub clipped: usize,
}

/// Fixed-size output image
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
    geometry: TileGeometry,
}

impl Canvas {
    /// Allocate a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: [u8; 3], geometry: TileGeometry) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(background)),
            geometry,
        }
    }

    /// Pixel origin of the cell at `pos`
    pub fn tile_origin(&self, pos: GridPos) -> (i64, i64) {
        self.geometry.origin(pos.column, pos.row)
    }

    /// Rectangle `tile` occupies, or `None` if it must not be drawn
    pub fn tile_rect(&self, tile: &Tile) -> Option<TileRect> {
        let pos = tile.placement()?;
        if !pos.within(self.geometry.grid_size) {
            return None;
        }
        let (x, y) = self.tile_origin(pos);
        Some(TileRect {
            tile: tile.id,
            x,
            y,
            width: tile.width(),
            height: tile.height(),
        })
    }

    /// Copy every drawable tile onto the canvas
    ///
    /// The canvas is split into one band of rows per worker and each band
    /// is filled independently. Within a band tiles are applied in index
    /// order, so overlapping seam pixels always come from the same tile.
    pub fn stitch(&mut self, tiles: &[Tile], pool: &WorkerPool) -> StitchReport {
        let rects: Vec<(TileRect, &RgbImage)> = tiles
            .iter()
            .filter_map(|tile| self.tile_rect(tile).map(|rect| (rect, tile.pixels())))
            .collect();

        let canvas_width = self.image.width();
        let canvas_height = self.image.height();
        let clipped = rects
            .iter()
            .filter(|(rect, _)| {
                rect.x < 0
                    || rect.y < 0
                    || rect.x + i64::from(rect.width) > i64::from(canvas_width)
                    || rect.y + i64::from(rect.height) > i64::from(canvas_height)
            })
            .count();
        let report = StitchReport {
            drawn: rects.len(),
            skipped: tiles.len() - rects.len(),
            clipped,
        };

        let row_bytes = canvas_width as usize * CHANNELS;
        if row_bytes == 0 || canvas_height == 0 {
            return report;
        }
        let band_rows = pool.band_rows(canvas_height as usize);
        let buffer: &mut [u8] = &mut self.image;

        pool.install(|| {
            buffer
                .par_chunks_mut(band_rows * row_bytes)
                .enumerate()
                .for_each(|(band_index, chunk)| {
                    let band = Band {
                        first_row: band_index * band_rows,
                        row_bytes,
                        canvas_width,
                    };
                    for (rect, pixels) in &rects {
                        band.copy_tile(chunk, rect, pixels);
                    }
                });
        });

        report
    }

    /// Composited pixels
    pub const fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Take the composited pixels
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

// A horizontal strip of canvas rows owned by one worker
struct Band {
    first_row: usize,
    row_bytes: usize,
    canvas_width: u32,
}

impl Band {
    fn copy_tile(&self, chunk: &mut [u8], rect: &TileRect, pixels: &RgbImage) {
        let band_start = self.first_row as i64;
        let band_end = band_start + (chunk.len() / self.row_bytes) as i64;

        let top = rect.y.max(band_start);
        let bottom = (rect.y + i64::from(rect.height)).min(band_end);
        let left = rect.x.max(0);
        let right = (rect.x + i64::from(rect.width)).min(i64::from(self.canvas_width));
        if top >= bottom || left >= right {
            return;
        }

        let src = pixels.as_raw();
        let src_row_bytes = rect.width as usize * CHANNELS;
        let span = (right - left) as usize * CHANNELS;
        let src_x = (left - rect.x) as usize * CHANNELS;
        let dst_x = left as usize * CHANNELS;

        for y in top..bottom {
            let src_start = (y - rect.y) as usize * src_row_bytes + src_x;
            let dst_start = (y - band_start) as usize * self.row_bytes + dst_x;
            if let (Some(dst), Some(row)) = (
                chunk.get_mut(dst_start..dst_start + span),
                src.get(src_start..src_start + span),
            ) {
                dst.copy_from_slice(row);
            }
        }
    }
}
