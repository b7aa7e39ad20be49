//! Input/output operations, configuration and error handling

/// Command-line interface and run orchestration
pub mod cli;
/// Constants and validated run configuration
pub mod configuration;
/// Error types and path context
pub mod error;
/// Canvas persistence
pub mod image;
/// Tile directory listing and decoding
pub mod loader;
/// Terminal logger setup
pub mod logging;
/// Progress bars for parallel phases
pub mod progress;
/// Phase timing
pub mod timing;
