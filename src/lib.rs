//! # cliparse
//!
//! Shared command-line conventions for a family of scripts, plus a
//! coordinator that validates one command line against several of them.
//!
//! ## Features
//!
//! - A fixed catalog of standard flags (`-R`, `-n`, `-y`, `-v`)
//! - A parser facade that reports usage errors as values
//! - A script registry fed by code or by TOML manifests
//! - Per-script argument filtering and batch result aggregation
//!
//! ## Example
//!
//! ```
//! use cliparse::core::{BaseParser, Coordinator, register_script};
//!
//! let mut coordinator = Coordinator::new();
//! register_script(coordinator.registry_mut(), "tidy", Some("Tidy files"), ["-n"], || {
//!     BaseParser::with_standard_flags("tidy", ["dry-run"])
//! })?;
//!
//! let results = coordinator.run(&["tidy"], &["-n", "-R"]);
//! assert!(results.all_success());
//! # Ok::<(), cliparse::error::CliparseError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod scripts;
pub mod utils;

use anyhow::Result;
use config::Verbosity;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so that script
/// summaries on stdout stay clean.
pub fn setup_logging(verbosity: Verbosity) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
