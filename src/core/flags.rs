//! Standard flag catalog
//!
//! The fixed set of boolean flags every parser may opt into.

use crate::error::{CliparseError, Result};
use clap::{Arg, ArgAction};
use std::fmt;
use std::str::FromStr;

/// Static description of one standard flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    /// Identifier used to select the flag (also the clap argument id)
    pub id: &'static str,
    /// Short option character
    pub short: char,
    /// Long option name, without the leading dashes
    pub long: &'static str,
    /// Literal command-line tokens, short form first
    pub tokens: &'static [&'static str],
    /// Help text
    pub help: &'static str,
}

static CATALOG: [FlagSpec; 4] = [
    FlagSpec {
        id: "recursive",
        short: 'R',
        long: "recursive",
        tokens: &["-R", "--recursive"],
        help: "Process directories recursively",
    },
    FlagSpec {
        id: "dry-run",
        short: 'n',
        long: "dry-run",
        tokens: &["-n", "--dry-run"],
        help: "Show what would be done without making changes",
    },
    FlagSpec {
        id: "yes",
        short: 'y',
        long: "yes",
        tokens: &["-y", "--yes"],
        help: "Automatically answer yes to all prompts",
    },
    FlagSpec {
        id: "verbose",
        short: 'v',
        long: "verbose",
        tokens: &["-v", "--verbose"],
        help: "Enable verbose output",
    },
];

/// One of the standard boolean flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFlag {
    Recursive,
    DryRun,
    Yes,
    Verbose,
}

impl StandardFlag {
    /// All standard flags in catalog order
    pub const ALL: [Self; 4] = [Self::Recursive, Self::DryRun, Self::Yes, Self::Verbose];

    /// Catalog entry for this flag
    pub fn spec(self) -> &'static FlagSpec {
        &CATALOG[self as usize]
    }

    /// Selection identifier (`recursive`, `dry-run`, `yes`, `verbose`)
    pub fn id(self) -> &'static str {
        self.spec().id
    }

    /// Literal tokens accepted on the command line
    pub fn tokens(self) -> &'static [&'static str] {
        self.spec().tokens
    }

    /// Look up a flag by its selection identifier
    pub fn from_id(id: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.id() == id)
            .ok_or_else(|| {
                CliparseError::configuration(format!(
                    "Unknown standard flag: {id}. Available: {}",
                    Self::ALL.map(Self::id).join(", ")
                ))
            })
    }

    /// Look up the flag owning a literal token such as `-R` or `--dry-run`
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.tokens().contains(&token))
    }

    /// Build the clap argument for this flag
    pub fn to_arg(self) -> Arg {
        let spec = self.spec();
        Arg::new(spec.id)
            .short(spec.short)
            .long(spec.long)
            .help(spec.help)
            .action(ArgAction::SetTrue)
    }
}

impl FromStr for StandardFlag {
    type Err = CliparseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_id(s)
    }
}

impl fmt::Display for StandardFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tokens_unique_across_catalog() {
        let mut seen = HashSet::new();
        for flag in StandardFlag::ALL {
            for token in flag.tokens() {
                assert!(seen.insert(*token), "duplicate token {token}");
            }
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_catalog_order_matches_enum() {
        for flag in StandardFlag::ALL {
            assert_eq!(StandardFlag::from_id(flag.id()).unwrap(), flag);
        }
        assert_eq!(StandardFlag::DryRun.tokens(), &["-n", "--dry-run"]);
        assert_eq!(StandardFlag::Recursive.tokens(), &["-R", "--recursive"]);
    }

    #[test]
    fn test_parse_from_id_string() {
        let flag: StandardFlag = "dry-run".parse().unwrap();
        assert_eq!(flag, StandardFlag::DryRun);
        assert_eq!(flag.to_string(), "dry-run");
        assert!("--dry-run".parse::<StandardFlag>().is_err());
    }

    #[test]
    fn test_unknown_flag_lists_valid_ids() {
        let err = StandardFlag::from_id("invalid_flag").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Unknown standard flag: invalid_flag"));
        assert!(message.contains("recursive, dry-run, yes, verbose"));
    }

    #[test]
    fn test_from_token() {
        assert_eq!(StandardFlag::from_token("-y"), Some(StandardFlag::Yes));
        assert_eq!(
            StandardFlag::from_token("--verbose"),
            Some(StandardFlag::Verbose)
        );
        assert_eq!(StandardFlag::from_token("--custom"), None);
    }
}
