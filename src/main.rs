#![allow(clippy::cargo_common_metadata)]
use anyhow::Result;
use cliparse::{cli, config::Config, setup_logging, utils::Console};

fn main() -> Result<()> {
    // Split runner flags from script arguments
    let args = cli::parse_args();

    // Initialize configuration
    let config = Config::from_args(&args)?;

    // Setup logging based on verbosity
    setup_logging(config.verbosity)?;

    let console = Console::from_choice(config.color);
    let code = cli::execute_command(&config, &console)?;
    std::process::exit(code);
}
