//! `process-fonts`: converts font files

use crate::{
    core::{BaseParser, ScriptRegistry, register_script},
    error::Result,
};
use clap::{Arg, ArgAction, builder::PossibleValuesParser};

pub const NAME: &str = "process-fonts";

/// Tokens this script accepts from a shared command line
pub const SUPPORTS: [&str; 6] = ["-R", "--recursive", "-v", "--verbose", "--dry-run", "--format"];

/// Build a fresh parser for the script
pub fn parser() -> Result<BaseParser> {
    Ok(BaseParser::new(NAME)
        .description("Process font files")
        .arg(
            Arg::new("files")
                .value_name("FILES")
                .help("Font files to process")
                .num_args(1..)
                .required(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(PossibleValuesParser::new(["otf", "ttf"]))
                .default_value("otf"),
        ))
}

pub fn register(registry: &mut ScriptRegistry) -> Result<()> {
    register_script(registry, NAME, None, SUPPORTS, parser)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = parser().unwrap().parse_args(["a.ttf"]).into_result().unwrap();
        assert_eq!(args.value("format"), Some("otf"));
        assert_eq!(args.flag("dry-run"), Some(false));
        assert_eq!(args.get_many::<String>("files"), vec!["a.ttf"]);
    }

    #[test]
    fn test_rejects_unknown_format() {
        let outcome = parser().unwrap().parse_args(["a.ttf", "--format", "woff"]);
        assert!(!outcome.is_success());
        assert_eq!(outcome.into_result().unwrap_err().exit_code(), 2);
    }

    #[test]
    fn test_register_derives_description() {
        let mut registry = ScriptRegistry::new();
        register(&mut registry).unwrap();
        let script = registry.get(NAME).unwrap();
        assert_eq!(script.description(), "Process font files");
        assert!(script.supports_flag("--format"));
        assert!(!script.supports_flag("-n"));
    }
}
