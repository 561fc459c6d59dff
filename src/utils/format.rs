//! Console formatting
//!
//! Styled output when the terminal supports it, plain text otherwise. The
//! renderer is chosen once by [`select_renderer`]; callers never branch on
//! colour support themselves.

use clap::ValueEnum;
use colored::Colorize;
use std::io::IsTerminal;

/// When to use coloured output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Colour only on a terminal and when `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve to a yes/no answer for the current process
    pub fn use_colour(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }
}

/// Style category for a status label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
}

impl Tone {
    const fn glyph(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }
}

/// Formats user-facing messages
pub trait Renderer: Send + Sync {
    /// Apply a tone's style to a piece of text
    fn paint(&self, tone: Tone, text: &str) -> String;

    fn success(&self, message: &str) -> String {
        format!("{} {message}", self.paint(Tone::Success, Tone::Success.glyph()))
    }

    fn error(&self, message: &str) -> String {
        format!("{} {message}", self.paint(Tone::Error, Tone::Error.glyph()))
    }

    fn warning(&self, message: &str) -> String {
        format!("{} {message}", self.paint(Tone::Warning, Tone::Warning.glyph()))
    }

    fn info(&self, message: &str) -> String {
        format!("{} {message}", self.paint(Tone::Info, Tone::Info.glyph()))
    }
}

/// ANSI-coloured output
#[derive(Debug, Default)]
pub struct StyledRenderer;

impl Renderer for StyledRenderer {
    fn paint(&self, tone: Tone, text: &str) -> String {
        match tone {
            Tone::Success => text.green(),
            Tone::Error => text.red(),
            Tone::Warning => text.yellow(),
            Tone::Info => text.blue(),
        }
        .to_string()
    }
}

/// Unstyled output
#[derive(Debug, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn paint(&self, _tone: Tone, text: &str) -> String {
        text.to_string()
    }
}

/// Pick the renderer for this process
pub fn select_renderer(choice: ColorChoice) -> Box<dyn Renderer> {
    if choice.use_colour() {
        // `colored` otherwise applies its own environment checks
        colored::control::set_override(true);
        Box::new(StyledRenderer)
    } else {
        Box::new(PlainRenderer)
    }
}

/// Writes rendered messages to stdout
pub struct Console {
    renderer: Box<dyn Renderer>,
}

impl Console {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self { renderer }
    }

    /// Console for the given colour choice
    pub fn from_choice(choice: ColorChoice) -> Self {
        Self::new(select_renderer(choice))
    }

    /// Print a message as-is
    pub fn emit(&self, message: &str) {
        println!("{message}");
    }

    pub fn print_success(&self, message: &str) {
        self.emit(&self.renderer.success(message));
    }

    pub fn print_error(&self, message: &str) {
        self.emit(&self.renderer.error(message));
    }

    pub fn print_warning(&self, message: &str) {
        self.emit(&self.renderer.warning(message));
    }

    pub fn print_info(&self, message: &str) {
        self.emit(&self.renderer.info(message));
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
