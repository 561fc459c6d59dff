//! Multi-script coordination
//!
//! Runs several registered scripts against one shared command line, giving
//! each script only the flags it declares.

use crate::{
    core::{
        filter::filter_args,
        manifest::ScriptManifest,
        parser::ParseOutcome,
        registry::{ScriptDescriptor, ScriptRegistry},
        results::{BatchResults, ExecutionResult},
    },
    error::{CliparseError, Result, exit_codes, format_error},
    utils::fs::FileSystemUtils,
};
use std::{fmt, path::Path};
use tracing::{debug, info, instrument, warn};

/// A unit of script registration, loaded by [`Coordinator::load_scripts`]
#[derive(Clone, Copy)]
pub struct ScriptModule {
    /// Module name used in diagnostics
    pub name: &'static str,
    /// Registers the module's scripts
    pub register: fn(&mut ScriptRegistry) -> Result<()>,
}

impl fmt::Debug for ScriptModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptModule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Coordinates execution of multiple scripts with per-script flag filtering
#[derive(Debug, Default)]
pub struct Coordinator {
    registry: ScriptRegistry,
}

impl Coordinator {
    /// Create a coordinator with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a coordinator around an existing registry
    pub const fn with_registry(registry: ScriptRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ScriptRegistry {
        &mut self.registry
    }

    /// Load script modules; a failing module is logged and skipped
    ///
    /// Returns how many modules registered successfully.
    #[instrument(skip(self, modules))]
    pub fn load_scripts(&mut self, modules: &[ScriptModule]) -> usize {
        let mut loaded = 0;

        for module in modules {
            match (module.register)(&mut self.registry) {
                Ok(()) => {
                    debug!("Loaded script module: {}", module.name);
                    loaded += 1;
                }
                Err(e) => {
                    let error = CliparseError::load(module.name, e.to_string());
                    warn!("{}", error);
                }
            }
        }

        debug!("Loaded {} of {} script module(s)", loaded, modules.len());
        loaded
    }

    /// Load script manifests from `dir` matching a glob `pattern`
    ///
    /// Files whose stem starts with `_` are skipped. A manifest that fails to
    /// read or validate is logged and skipped; only an unreadable directory or
    /// an invalid pattern is an error. Returns how many scripts were loaded.
    #[instrument(skip(self))]
    pub fn load_scripts_from_directory(&mut self, dir: &Path, pattern: &str) -> Result<usize> {
        let files = FileSystemUtils::new().find_files(dir, pattern)?;
        let mut loaded = 0;

        for path in files {
            let hidden = path
                .file_stem()
                .is_some_and(|stem| stem.to_string_lossy().starts_with('_'));
            if hidden {
                debug!("Skipping {}", path.display());
                continue;
            }

            match ScriptManifest::from_file(&path) {
                Ok(manifest) => {
                    manifest.register(&mut self.registry, &path.display().to_string());
                    loaded += 1;
                }
                Err(e) => warn!("Skipping {}: {}", path.display(), format_error(&e, true)),
            }
        }

        info!("Loaded {} script manifest(s) from {}", loaded, dir.display());
        Ok(loaded)
    }

    /// Filter a shared argument list down to what `script_name` accepts
    pub fn filter_args_for_script<S: AsRef<str>>(
        &self,
        script_name: &str,
        all_args: &[S],
    ) -> Result<Vec<String>> {
        let script = self
            .registry
            .get(script_name)
            .ok_or_else(|| CliparseError::script_not_found(script_name))?;

        Ok(filter_args(all_args, |flag| script.supports_flag(flag)))
    }

    /// Run each named script, in order, against the shared argument list
    #[instrument(skip(self, scripts, args))]
    pub fn run<N, S>(&self, scripts: &[N], args: &[S]) -> BatchResults
    where
        N: AsRef<str>,
        S: AsRef<str>,
    {
        scripts
            .iter()
            .map(|name| self.run_single_script(name.as_ref(), args))
            .collect()
    }

    fn run_single_script<S: AsRef<str>>(
        &self,
        script_name: &str,
        all_args: &[S],
    ) -> ExecutionResult {
        let Some(script) = self.registry.get(script_name) else {
            warn!("Script not found: {}", script_name);
            return ExecutionResult::failed(
                script_name,
                exit_codes::ERROR,
                CliparseError::script_not_found(script_name).to_string(),
            );
        };

        let filtered = filter_args(all_args, |flag| script.supports_flag(flag));
        debug!("Arguments for {}: {:?}", script_name, filtered);

        let result = Self::check_arguments(script, &filtered);
        if result.success {
            info!("{}: arguments accepted", script_name);
        } else {
            warn!(
                "{}: {} (exit code {})",
                script_name,
                result.error_message.as_deref().unwrap_or("failed"),
                result.exit_code
            );
        }
        result
    }

    /// Build a fresh parser and parse the filtered tokens
    fn check_arguments(script: &ScriptDescriptor, filtered: &[String]) -> ExecutionResult {
        let parser = match script.build_parser() {
            Ok(parser) => parser,
            Err(e) => {
                return ExecutionResult::failed(script.name(), exit_codes::ERROR, e.to_string());
            }
        };

        match parser.parse_args(filtered) {
            ParseOutcome::Success(_) => ExecutionResult::succeeded(script.name()),
            ParseOutcome::UsageFailure { exit_code, message } => {
                debug!("Usage output from {}:\n{}", script.name(), message);
                ExecutionResult::failed(script.name(), exit_code, "Argument parsing failed")
            }
            ParseOutcome::OtherFailure { message } => {
                ExecutionResult::failed(script.name(), exit_codes::ERROR, message)
            }
        }
    }

    /// Registered script names in registration order
    pub fn list_scripts(&self) -> Vec<String> {
        self.registry.list_all()
    }

    /// Descriptor for a script, if registered
    pub fn get_script_info(&self, script_name: &str) -> Option<&ScriptDescriptor> {
        self.registry.get(script_name)
    }
}
