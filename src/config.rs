//! Configuration management for the batch runner
//!
//! Centralizes configuration options and provides validation.

use crate::{
    cli::Args,
    core::flags::StandardFlag,
    error::{CliparseError, Result},
    utils::format::ColorChoice,
};
use std::{path::PathBuf, str::FromStr};

/// Output verbosity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Normal user-facing output
    #[default]
    Brief,
    /// Progress for each script
    Verbose,
    /// Internal execution steps
    Debug,
}

impl Verbosity {
    /// Log filter directive for this verbosity
    pub const fn filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Brief => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Which scripts a batch run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSelection {
    /// Every registered script, in registration order
    All,
    /// The named scripts, in the given order
    Named(Vec<String>),
}

impl ScriptSelection {
    /// Resolve against the registered names
    pub fn resolve(&self, registered: &[String]) -> Vec<String> {
        match self {
            Self::All => registered.to_vec(),
            Self::Named(names) => names.clone(),
        }
    }
}

impl FromStr for ScriptSelection {
    type Err = CliparseError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim() == "all" {
            return Ok(Self::All);
        }

        let names: Vec<String> = s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            return Err(CliparseError::configuration(
                "No scripts selected; pass --scripts all or a comma-separated list",
            ));
        }
        Ok(Self::Named(names))
    }
}

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Output verbosity
    pub verbosity: Verbosity,
    /// Colour output choice
    pub color: ColorChoice,
    /// Scripts to run
    pub selection: ScriptSelection,
    /// List scripts instead of running them
    pub list: bool,
    /// Optional directory of script manifests
    pub script_dir: Option<PathBuf>,
    /// Manifest file pattern
    pub manifest_pattern: String,
    /// Arguments shared by every selected script
    pub script_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            color: ColorChoice::default(),
            selection: ScriptSelection::All,
            list: false,
            script_dir: None,
            manifest_pattern: "*.toml".to_string(),
            script_args: Vec::new(),
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let verbosity = if args.debug {
            Verbosity::Debug
        } else if args.quiet {
            Verbosity::Quiet
        } else if args
            .script_args
            .iter()
            .any(|arg| StandardFlag::from_token(arg) == Some(StandardFlag::Verbose))
        {
            Verbosity::Verbose
        } else {
            Verbosity::Brief
        };

        let config = Self {
            verbosity,
            color: args.color,
            selection: args.scripts.parse()?,
            list: args.list,
            script_dir: args.script_dir.clone(),
            manifest_pattern: args.pattern.clone(),
            script_args: args.script_args.clone(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.script_dir {
            if !dir.is_dir() {
                return Err(CliparseError::configuration(format!(
                    "Script directory not found: {}",
                    dir.display()
                )));
            }
        }

        if self.manifest_pattern.trim().is_empty() {
            return Err(CliparseError::configuration("Manifest pattern must not be empty"));
        }

        Ok(())
    }
}
