//! Command-line interface module
//!
//! Provides argument parsing and command execution.

pub mod args;
pub mod commands;

pub use args::{Args, parse_args, parse_args_from, split_runner_args};
pub use commands::execute_command;
