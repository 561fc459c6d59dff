//! Command implementations for the CLI

use crate::{
    config::{Config, Verbosity},
    core::{BatchResults, Coordinator},
    error::exit_codes,
    scripts,
    utils::format::Console,
};
use anyhow::Context;
use tracing::{info, instrument};

/// Execute the runner and return the process exit code
#[instrument(skip(config, console))]
pub fn execute_command(config: &Config, console: &Console) -> anyhow::Result<i32> {
    let coordinator = build_coordinator(config, console)?;

    if config.list {
        execute_list_command(&coordinator, console);
        return Ok(exit_codes::SUCCESS);
    }

    Ok(execute_run_command(config, &coordinator, console))
}

/// Register the built-in scripts, then any manifests from the script directory
fn build_coordinator(config: &Config, console: &Console) -> anyhow::Result<Coordinator> {
    let mut coordinator = Coordinator::new();
    coordinator.load_scripts(&scripts::builtin_modules());

    if let Some(dir) = &config.script_dir {
        let loaded = coordinator
            .load_scripts_from_directory(dir, &config.manifest_pattern)
            .with_context(|| format!("Failed to load scripts from {}", dir.display()))?;

        if config.verbosity >= Verbosity::Verbose {
            console.print_info(&format!(
                "Loaded {loaded} script manifest(s) from {}",
                dir.display()
            ));
        }
    }

    Ok(coordinator)
}

/// Print every registered script with its supported flags
fn execute_list_command(coordinator: &Coordinator, console: &Console) {
    console.emit("Available scripts:");
    for script in coordinator.registry().iter() {
        let supports: Vec<&str> = script
            .supported_flags()
            .iter()
            .map(String::as_str)
            .collect();
        console.emit(&format!("  {}: {}", script.name(), script.description()));
        console.emit(&format!("    Supports: {}", supports.join(", ")));
    }
}

/// Run the selected scripts and report the batch
#[instrument(skip_all)]
fn execute_run_command(config: &Config, coordinator: &Coordinator, console: &Console) -> i32 {
    let selected = config.selection.resolve(&coordinator.list_scripts());
    for name in selected.iter().filter(|name| !coordinator.registry().contains(name)) {
        console.print_warning(&format!("Unknown script '{name}'; see --list"));
    }
    info!("Running {} script(s): {}", selected.len(), selected.join(", "));

    let results = coordinator.run(&selected, &config.script_args);

    console.emit("");
    console.emit(&results.summary());
    report_status(&results, console);

    results.exit_code()
}

fn report_status(results: &BatchResults, console: &Console) {
    if results.all_success() {
        console.print_success("All scripts completed successfully");
    } else {
        console.print_error(&format!("{} script(s) failed", results.failed_count()));
    }
}
