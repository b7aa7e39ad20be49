//! Canvas persistence with a configurable lossy quality

use crate::io::error::{PuzzleError, Result, WithPath, invalid_parameter};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the canvas to `output_path`
///
/// The format follows the file extension. JPEG output uses `quality`
/// (1-100); other formats ignore it.
///
/// # Errors
///
/// Returns an error if:
/// - The quality is outside 1-100
/// - The extension does not name a supported image format
/// - The parent directory cannot be created
/// - Encoding or writing the file fails
pub fn save_canvas(canvas: &RgbImage, output_path: &Path, quality: u8) -> Result<()> {
    if !(1..=100).contains(&quality) {
        return Err(invalid_parameter(
            "quality",
            &quality,
            &"must be between 1 and 100",
        ));
    }

    let format = ImageFormat::from_path(output_path).map_err(|e| PuzzleError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    if format == ImageFormat::Jpeg {
        let file = File::create(output_path).with_path(output_path, "create file")?;
        let mut writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
        canvas
            .write_with_encoder(encoder)
            .with_path(output_path, "encode")?;
        writer.flush().with_path(output_path, "flush file")?;
    } else {
        canvas
            .save_with_format(output_path, format)
            .with_path(output_path, "write")?;
    }

    log::debug!("canvas written to {}", output_path.display());
    Ok(())
}
