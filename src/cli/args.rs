//! Command-line argument parsing for the batch runner
//!
//! The runner owns a handful of flags; everything else on the command line
//! belongs to the scripts and is passed through untouched.

use crate::{core::filter::looks_like_flag, utils::format::ColorChoice};
use clap::Parser;
use std::{ffi::OsString, path::PathBuf};

/// Batch runner - validates one command line against several scripts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "batch-runner")]
#[command(after_help = "Any other argument is passed through to the selected scripts.\n\
    Example: batch-runner --scripts all fonts/a.ttf fonts/b.ttf -R -v")]
pub struct Args {
    /// Comma-separated script names, or "all"
    #[arg(long, value_name = "NAMES", default_value = "all")]
    pub scripts: String,

    /// List available scripts and exit
    #[arg(long)]
    pub list: bool,

    /// Directory of TOML script manifests to load
    #[arg(long = "script-dir", value_name = "DIR")]
    pub script_dir: Option<PathBuf>,

    /// Glob pattern selecting manifest files inside --script-dir
    #[arg(long, value_name = "GLOB", default_value = "*.toml")]
    pub pattern: String,

    /// When to use coloured output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Only report errors
    #[arg(long, conflicts_with = "debug")]
    pub quiet: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Arguments handed to the scripts
    #[arg(skip)]
    pub script_args: Vec<String>,
}

/// Runner-owned flags and whether each takes a value
const RUNNER_FLAGS: &[(&str, bool)] = &[
    ("--scripts", true),
    ("--list", false),
    ("--script-dir", true),
    ("--pattern", true),
    ("--color", true),
    ("--quiet", false),
    ("--debug", false),
    ("-h", false),
    ("--help", false),
    ("-V", false),
    ("--version", false),
];

fn runner_flag(token: &str) -> Option<bool> {
    RUNNER_FLAGS
        .iter()
        .find(|(flag, _)| *flag == token)
        .map(|(_, takes_value)| *takes_value)
}

/// Split a command line (program name excluded) into runner tokens and
/// pass-through tokens, preserving the order of each
pub fn split_runner_args<S: AsRef<str>>(args: &[S]) -> (Vec<String>, Vec<String>) {
    let mut own = Vec::new();
    let mut rest = Vec::new();
    let mut i = 0;

    while i < args.len() {
        let arg: &str = args[i].as_ref();
        i += 1;

        if !looks_like_flag(arg) {
            rest.push(arg.to_string());
            continue;
        }

        let flag = arg.split_once('=').map_or(arg, |(flag, _)| flag);
        match runner_flag(flag) {
            Some(takes_value) => {
                own.push(arg.to_string());
                if takes_value && !arg.contains('=') {
                    if let Some(value) = args.get(i) {
                        own.push(value.as_ref().to_string());
                        i += 1;
                    }
                }
            }
            None => rest.push(arg.to_string()),
        }
    }

    (own, rest)
}

/// Parse runner arguments from an explicit command line (program name included)
pub fn parse_args_from<I, T>(argv: I) -> Args
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv = argv
        .into_iter()
        .map(|arg| arg.into().to_string_lossy().into_owned());
    let program = argv.next().unwrap_or_else(|| "batch-runner".to_string());
    let tokens: Vec<String> = argv.collect();

    let (own, rest) = split_runner_args(&tokens);
    let mut args = Args::parse_from(std::iter::once(program).chain(own));
    args.script_args = rest;
    args
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    parse_args_from(std::env::args_os())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_runner_args() {
        let (own, rest) = split_runner_args(&[
            "fonts/a.ttf",
            "--scripts",
            "process-fonts",
            "-R",
            "--color=never",
            "--format",
            "otf",
            "--list",
        ]);

        assert_eq!(own, vec!["--scripts", "process-fonts", "--color=never", "--list"]);
        assert_eq!(rest, vec!["fonts/a.ttf", "-R", "--format", "otf"]);
    }

    #[test]
    fn test_standard_flags_pass_through() {
        let (own, rest) = split_runner_args(&["-v", "-n", "--yes", "--recursive"]);
        assert!(own.is_empty());
        assert_eq!(rest, vec!["-v", "-n", "--yes", "--recursive"]);
    }

    #[test]
    fn test_parse_basic_args() {
        let args = parse_args_from(["batch-runner", "a.ttf"]);
        assert_eq!(args.scripts, "all");
        assert!(!args.list);
        assert!(!args.debug);
        assert_eq!(args.color, ColorChoice::Auto);
        assert_eq!(args.script_args, vec!["a.ttf"]);
    }

    #[test]
    fn test_parse_runner_options() {
        let args = parse_args_from([
            "batch-runner",
            "--scripts",
            "a,b",
            "--script-dir",
            "scripts",
            "--debug",
            "x.txt",
            "-v",
        ]);
        assert_eq!(args.scripts, "a,b");
        assert_eq!(args.script_dir, Some(PathBuf::from("scripts")));
        assert!(args.debug);
        assert_eq!(args.script_args, vec!["x.txt", "-v"]);
    }
}
