use anyhow::Result;
use clap::Parser;
use tracing::Level;

use octorank::cli::{self, Cli};
use octorank::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;
    // Otherwise `colored` decides from the terminal and NO_COLOR.
    if !config.output.color_output {
        colored::control::set_override(false);
    }

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()?;
    }

    cli::run(&cli, &config)
}
