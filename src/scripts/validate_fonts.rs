//! `validate-fonts`: checks font files without modifying them

use crate::{
    core::{BaseParser, ScriptRegistry, register_script},
    error::Result,
};
use clap::{Arg, ArgAction};

pub const NAME: &str = "validate-fonts";

pub const SUPPORTS: [&str; 5] = ["-R", "--recursive", "-v", "--verbose", "--strict"];

pub fn parser() -> Result<BaseParser> {
    Ok(BaseParser::with_standard_flags(NAME, ["recursive", "verbose"])?
        .description("Validate font files")
        .arg(
            Arg::new("files")
                .value_name("FILES")
                .help("Font files to validate")
                .num_args(1..)
                .required(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Treat warnings as errors")
                .action(ArgAction::SetTrue),
        ))
}

pub fn register(registry: &mut ScriptRegistry) -> Result<()> {
    register_script(registry, NAME, Some("Validate font files"), SUPPORTS, parser)?;
    Ok(())
}
