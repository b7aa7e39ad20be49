//! Error types and path context for puzzle reconstruction

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all reconstruction operations
#[derive(Debug)]
pub enum PuzzleError {
    /// Failed to decode a tile image
    TileLoad {
        /// Path to the tile file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// No tile matched both the first-column width and the first-row height
    NoAnchor {
        /// Width a corner tile must have
        first_col_width: u32,
        /// Height a corner tile must have
        first_row_height: u32,
    },

    /// The input directory does not hold one tile per grid cell
    TileCountMismatch {
        /// Number of grid cells
        expected: usize,
        /// Number of tiles found
        found: usize,
    },

    /// A tile's dimensions fit neither the interior nor the first row/column size
    UnexpectedTileSize {
        /// Tile index in load order
        tile: usize,
        /// Tile width in pixels
        width: u32,
        /// Tile height in pixels
        height: u32,
    },

    /// Source image cannot be cut with the configured geometry
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save the composited canvas
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Worker pool could not be created
    ThreadPool {
        /// Underlying rayon error
        source: rayon::ThreadPoolBuildError,
    },

    /// Terminal logger could not be installed
    Logger {
        /// Underlying logger error
        source: log::SetLoggerError,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TileLoad { path, source } => {
                write!(f, "Failed to load tile '{}': {source}", path.display())
            }
            Self::NoAnchor {
                first_col_width,
                first_row_height,
            } => {
                write!(
                    f,
                    "No anchor tile found: no tile measures {first_col_width}x{first_row_height}"
                )
            }
            Self::TileCountMismatch { expected, found } => {
                write!(f, "Expected {expected} tiles but found {found}")
            }
            Self::UnexpectedTileSize {
                tile,
                width,
                height,
            } => {
                write!(
                    f,
                    "Tile {tile} has unexpected size {width}x{height} for the configured grid"
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ThreadPool { source } => {
                write!(f, "Failed to build worker pool: {source}")
            }
            Self::Logger { source } => {
                write!(f, "Failed to install logger: {source}")
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TileLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::ThreadPool { source } => Some(source),
            Self::Logger { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for reconstruction results
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Attaches the file involved to errors coming from `std::fs` and `image`
pub trait WithPath<T> {
    /// Convert the error into a [`PuzzleError`] naming `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| PuzzleError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl<T> WithPath<T> for std::result::Result<T, image::ImageError> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| match operation {
            "write" | "encode" => PuzzleError::ImageExport {
                path: path.to_path_buf(),
                source,
            },
            _ => PuzzleError::TileLoad {
                path: path.to_path_buf(),
                source,
            },
        })
    }
}

impl From<rayon::ThreadPoolBuildError> for PuzzleError {
    fn from(source: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool { source }
    }
}

impl From<log::SetLoggerError> for PuzzleError {
    fn from(source: log::SetLoggerError) -> Self {
        Self::Logger { source }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
