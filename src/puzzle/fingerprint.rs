//! Border fingerprints for exact-match adjacency detection
//!
//! Each border (the outermost pixel column or row) is reduced to grayscale,
//! quantised by [`INTENSITY_QUANTUM`] and folded into a 64-bit digest. Two
//! tiles cut from neighbouring regions share their seam pixels, so one
//! tile's right fingerprint equals the other's left fingerprint.

use crate::io::configuration::{HASH_MAGIC_NUMBER, INTENSITY_QUANTUM};
use image::{GrayImage, Luma, RgbImage, imageops};

/// Digest of one tile border
pub type Fingerprint = u64;

/// Fingerprints of the left, right, top and bottom borders, in that order
pub type Fingerprints = [Fingerprint; 4];

/// Fold a sequence of grayscale intensities into a fingerprint
///
/// Seeded at zero; each step computes
/// `hash ^= intensity / 10 + MAGIC + (hash << 6) + (hash >> 2)` with
/// wrapping arithmetic.
pub fn fold_border<I>(intensities: I) -> Fingerprint
where
    I: IntoIterator<Item = u8>,
{
    intensities.into_iter().fold(0, |hash: u64, intensity| {
        let quantised = u64::from(intensity / INTENSITY_QUANTUM);
        hash ^ quantised
            .wrapping_add(HASH_MAGIC_NUMBER)
            .wrapping_add(hash << 6)
            .wrapping_add(hash >> 2)
    })
}

fn intensity(gray: &GrayImage, x: u32, y: u32) -> Option<u8> {
    gray.get_pixel_checked(x, y).map(|&Luma([value])| value)
}

fn column(gray: &GrayImage, x: u32) -> Fingerprint {
    fold_border((0..gray.height()).filter_map(|y| intensity(gray, x, y)))
}

fn row(gray: &GrayImage, y: u32) -> Fingerprint {
    fold_border((0..gray.width()).filter_map(|x| intensity(gray, x, y)))
}

/// Compute all four border fingerprints of a tile
///
/// Columns are folded top to bottom and rows left to right. An empty image
/// yields four zero fingerprints.
pub fn fingerprint_tile(pixels: &RgbImage) -> Fingerprints {
    let gray = imageops::grayscale(pixels);
    let last_x = gray.width().saturating_sub(1);
    let last_y = gray.height().saturating_sub(1);

    [
        column(&gray, 0),
        column(&gray, last_x),
        row(&gray, 0),
        row(&gray, last_y),
    ]
}
