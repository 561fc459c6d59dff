//! Utility modules for common functionality
//!
//! Provides reusable utilities for file discovery and console formatting.

pub mod format;
pub mod fs;

pub use format::{ColorChoice, Console, PlainRenderer, Renderer, StyledRenderer, select_renderer};
pub use fs::FileSystemUtils;
