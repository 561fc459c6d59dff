//! Parser facade with standard flags built in
//!
//! Wraps a `clap::Command`, injecting the standard flags a caller selects and
//! reporting parse results as values instead of exiting the process.

use crate::{
    core::flags::StandardFlag,
    error::{CliparseError, Result},
};
use clap::{Arg, ArgMatches, Command, error::ErrorKind};
use std::{any::Any, ffi::OsString, fmt, sync::Arc};
use tracing::{debug, instrument};

/// Post-parse check run against successfully parsed arguments
pub type Validator = Arc<dyn Fn(&ParsedArgs) -> Result<()> + Send + Sync>;

/// Command-line parser with a selectable set of standard flags
///
/// ```
/// use cliparse::core::BaseParser;
/// use clap::Arg;
///
/// let parser = BaseParser::with_standard_flags("process", ["verbose", "dry-run"])?
///     .description("Process files")
///     .arg(Arg::new("files").num_args(1..).required(true));
/// let args = parser.parse_args(["a.txt", "-v"]).into_result()?;
/// assert_eq!(args.flag("verbose"), Some(true));
/// assert_eq!(args.flag("recursive"), None);
/// # Ok::<(), cliparse::error::CliparseError>(())
/// ```
#[derive(Clone)]
pub struct BaseParser {
    name: String,
    description: Option<String>,
    command: Command,
    standard_flags: Vec<StandardFlag>,
    validators: Vec<Validator>,
}

impl BaseParser {
    /// Create a parser with every standard flag included
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_flags(name.into(), StandardFlag::ALL.to_vec())
    }

    /// Create a parser with only the listed standard flags
    ///
    /// Fails with a configuration error naming the first unknown identifier.
    pub fn with_standard_flags<I, S>(name: impl Into<String>, flags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let flags = flags
            .into_iter()
            .map(|id| StandardFlag::from_id(id.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_flags(name.into(), flags))
    }

    fn from_flags(name: String, flags: Vec<StandardFlag>) -> Self {
        let command = flags
            .iter()
            .fold(Command::new(name.clone()), |command, flag| {
                command.arg(flag.to_arg())
            });

        Self {
            name,
            description: None,
            command,
            standard_flags: flags,
            validators: Vec::new(),
        }
    }

    /// Set the program description shown in help output
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.command = self.command.about(description.clone());
        self.description = Some(description);
        self
    }

    /// Set text shown after the option list in help output
    #[must_use]
    pub fn epilog(mut self, epilog: impl Into<String>) -> Self {
        self.command = self.command.after_help(epilog.into());
        self
    }

    /// Add a caller-defined positional or option argument
    #[must_use]
    pub fn arg(mut self, arg: Arg) -> Self {
        self.command = self.command.arg(arg);
        self
    }

    /// Add a check that runs after clap accepts the arguments
    #[must_use]
    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&ParsedArgs) -> Result<()> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Program name used in usage output
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Program description, if one was set
    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Identifiers of the standard flags this parser accepts, in request order
    pub fn standard_flags(&self) -> Vec<&'static str> {
        self.standard_flags.iter().map(|flag| flag.id()).collect()
    }

    /// Render the full help text
    pub fn render_help(&self) -> String {
        self.command.clone().render_help().to_string()
    }

    /// Parse the given tokens (program name excluded)
    #[instrument(skip(self, args), fields(parser = %self.name))]
    pub fn parse_args<I, T>(&self, args: I) -> ParseOutcome
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv = std::iter::once(OsString::from(&self.name))
            .chain(args.into_iter().map(Into::into));

        let matches = match self.command.clone().try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(e) => {
                debug!("Argument parsing stopped: {:?}", e.kind());
                let exit_code = match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                    _ => e.exit_code(),
                };
                return ParseOutcome::UsageFailure {
                    exit_code,
                    message: e.render().to_string(),
                };
            }
        };

        let parsed = ParsedArgs { matches };
        for validator in &self.validators {
            if let Err(e) = validator(&parsed) {
                debug!("Validator rejected arguments: {}", e);
                let message = match e {
                    CliparseError::Validation { message } => message,
                    other => other.to_string(),
                };
                return ParseOutcome::OtherFailure { message };
            }
        }

        ParseOutcome::Success(parsed)
    }

    /// Parse the current process arguments
    pub fn parse_env(&self) -> ParseOutcome {
        self.parse_args(std::env::args_os().skip(1))
    }
}

impl fmt::Debug for BaseParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseParser")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("standard_flags", &self.standard_flags)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Convenience constructor mirroring [`BaseParser::with_standard_flags`]
///
/// `None` selects every standard flag.
pub fn create_parser(
    name: &str,
    description: &str,
    standard_flags: Option<&[&str]>,
) -> Result<BaseParser> {
    let parser = match standard_flags {
        Some(flags) => BaseParser::with_standard_flags(name, flags)?,
        None => BaseParser::new(name),
    };
    Ok(parser.description(description))
}

/// Outcome of a parse attempt
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// Arguments were accepted
    Success(ParsedArgs),
    /// The argument engine asked to exit: malformed input, or help/version shown
    UsageFailure { exit_code: i32, message: String },
    /// Any other failure, such as a rejected validation
    OtherFailure { message: String },
}

impl ParseOutcome {
    /// Whether the arguments were accepted
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Convert into a `Result`, keeping the usage exit code
    pub fn into_result(self) -> Result<ParsedArgs> {
        match self {
            Self::Success(args) => Ok(args),
            Self::UsageFailure { exit_code, message } => {
                Err(CliparseError::usage(message, exit_code))
            }
            Self::OtherFailure { message } => Err(CliparseError::validation(message)),
        }
    }
}

/// Arguments accepted by a [`BaseParser`]
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    matches: ArgMatches,
}

impl ParsedArgs {
    /// Value of a boolean flag
    ///
    /// `None` means the parser never defined the flag; a defined flag that was
    /// not passed is `Some(false)`.
    pub fn flag(&self, id: &str) -> Option<bool> {
        self.get_one::<bool>(id).copied()
    }

    /// Whether the parser defined an argument with this id
    pub fn contains(&self, id: &str) -> bool {
        self.matches.ids().any(|known| known.as_str() == id)
    }

    /// Typed single value
    pub fn get_one<T: Any + Clone + Send + Sync + 'static>(&self, id: &str) -> Option<&T> {
        self.matches.try_get_one::<T>(id).ok().flatten()
    }

    /// Typed list of values; empty when absent
    pub fn get_many<T: Any + Clone + Send + Sync + 'static>(&self, id: &str) -> Vec<&T> {
        self.matches
            .try_get_many::<T>(id)
            .ok()
            .flatten()
            .map(Iterator::collect)
            .unwrap_or_default()
    }

    /// String value of an option
    pub fn value(&self, id: &str) -> Option<&str> {
        self.get_one::<String>(id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{ArgAction, value_parser};

    fn parse(parser: &BaseParser, args: &[&str]) -> ParsedArgs {
        match parser.parse_args(args) {
            ParseOutcome::Success(parsed) => parsed,
            other => panic!("Expected successful parse, got {other:?}"),
        }
    }

    #[test]
    fn test_base_parser_includes_standard_flags() {
        let parser = BaseParser::new("test").description("Test parser");
        let args = parse(&parser, &["-R", "--dry-run", "-y", "-v"]);

        assert_eq!(args.flag("recursive"), Some(true));
        assert_eq!(args.flag("dry-run"), Some(true));
        assert_eq!(args.flag("yes"), Some(true));
        assert_eq!(args.flag("verbose"), Some(true));
    }

    #[test]
    fn test_base_parser_selective_flags() {
        let parser = BaseParser::with_standard_flags("test", ["verbose", "dry-run"]).unwrap();
        let args = parse(&parser, &["--verbose"]);

        assert_eq!(args.flag("verbose"), Some(true));
        assert_eq!(args.flag("dry-run"), Some(false));
        assert_eq!(args.flag("recursive"), None);
        assert!(!args.contains("recursive"));
    }

    #[test]
    fn test_base_parser_with_custom_args() {
        let parser = BaseParser::new("test").arg(
            Arg::new("custom")
                .long("custom")
                .value_parser(value_parser!(i64))
                .default_value("42"),
        );

        let args = parse(&parser, &["--custom", "100", "-v"]);
        assert_eq!(args.get_one::<i64>("custom"), Some(&100));
        assert_eq!(args.flag("verbose"), Some(true));

        let args = parse(&parser, &[]);
        assert_eq!(args.get_one::<i64>("custom"), Some(&42));
    }

    #[test]
    fn test_base_parser_no_standard_flags() {
        let empty: [&str; 0] = [];
        let parser = BaseParser::with_standard_flags("test", empty).unwrap();
        let args = parse(&parser, &[]);

        for flag in StandardFlag::ALL {
            assert_eq!(args.flag(flag.id()), None);
            assert!(!args.contains(flag.id()));
        }
    }

    #[test]
    fn test_invalid_standard_flag() {
        let err = BaseParser::with_standard_flags("test", ["invalid_flag"]).unwrap_err();
        assert!(matches!(err, CliparseError::Configuration { .. }));
        assert!(err.to_string().contains("Unknown standard flag: invalid_flag"));
    }

    #[test]
    fn test_get_standard_flags() {
        let parser = BaseParser::with_standard_flags("test", ["verbose", "dry-run"]).unwrap();
        assert_eq!(parser.standard_flags(), vec!["verbose", "dry-run"]);
    }

    #[test]
    fn test_unknown_flag_is_usage_failure() {
        let parser = BaseParser::with_standard_flags("test", ["verbose"]).unwrap();
        match parser.parse_args(["--recursive"]) {
            ParseOutcome::UsageFailure { exit_code, message } => {
                assert_eq!(exit_code, 2);
                assert!(message.contains("--recursive"));
            }
            other => panic!("Expected usage failure, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_positional_is_usage_failure() {
        let parser = BaseParser::new("test").arg(
            Arg::new("files")
                .num_args(1..)
                .required(true)
                .action(ArgAction::Append),
        );
        let err = parser.parse_args(["-v"]).into_result().unwrap_err();
        assert!(err.is_usage());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_help_is_usage_exit_with_zero() {
        let parser = BaseParser::new("test").description("Helpful parser");
        match parser.parse_args(["--help"]) {
            ParseOutcome::UsageFailure { exit_code, message } => {
                assert_eq!(exit_code, 0);
                assert!(message.contains("Helpful parser"));
            }
            other => panic!("Expected help exit, got {other:?}"),
        }
    }

    #[test]
    fn test_validator_failure_is_other_failure() {
        let parser = BaseParser::new("test")
            .arg(Arg::new("files").num_args(0..).action(ArgAction::Append))
            .validator(|args| {
                if args.get_many::<String>("files").is_empty() {
                    Err(CliparseError::validation("at least one file is needed"))
                } else {
                    Ok(())
                }
            });

        assert!(parser.parse_args(["a.txt"]).is_success());
        match parser.parse_args(["-v"]) {
            ParseOutcome::OtherFailure { message } => {
                assert!(message.contains("at least one file is needed"));
            }
            other => panic!("Expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_create_parser() {
        let parser = create_parser("tool", "Process files", Some(&["yes"][..])).unwrap();
        assert_eq!(parser.get_description(), Some("Process files"));
        assert_eq!(parser.standard_flags(), vec!["yes"]);
        assert!(parser.render_help().contains("--yes"));

        let parser = create_parser("tool", "Process files", None).unwrap();
        assert_eq!(parser.standard_flags().len(), 4);
    }
}
