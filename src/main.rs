//! CLI entry point for the tile stitcher

use clap::Parser;
use tilestitch::io::cli::Cli;
use tilestitch::io::logging;

fn main() -> tilestitch::Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level_for(cli.quiet, cli.verbose))?;
    cli.run()
}
