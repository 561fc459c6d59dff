//! Declarative script manifests
//!
//! A manifest is a TOML file describing one script's parser and the flag
//! tokens it accepts, so scripts can be registered without writing Rust:
//!
//! ```toml
//! name = "check-links"
//! description = "Check links in documents"
//! standard_flags = ["verbose", "dry-run"]
//! supports = ["-v", "--verbose", "--timeout"]
//!
//! [[positional]]
//! name = "files"
//! multiple = true
//!
//! [[option]]
//! long = "timeout"
//! takes_value = true
//! default = "30"
//! ```

use crate::{
    core::{
        flags::StandardFlag,
        parser::BaseParser,
        registry::{ScriptDescriptor, ScriptRegistry},
    },
    error::{CliparseError, Result},
    utils::fs::FileSystemUtils,
};
use clap::{Arg, ArgAction, builder::PossibleValuesParser};
use regex::Regex;
use serde::Deserialize;
use std::{
    collections::HashSet,
    path::Path,
    sync::{Arc, LazyLock},
};
use tracing::{debug, instrument};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid regex"));
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--?[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid regex"));

/// Positional argument declared by a manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionalSpec {
    pub name: String,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub multiple: bool,
}

/// Option declared by a manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionSpec {
    /// Long name without dashes; also the argument id
    pub long: String,
    #[serde(default)]
    pub short: Option<char>,
    #[serde(default)]
    pub help: Option<String>,
    /// `false` declares a boolean switch
    #[serde(default)]
    pub takes_value: bool,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub default: Option<String>,
}

/// Script described by a TOML manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptManifest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Standard flag identifiers; `None` includes all of them
    #[serde(default)]
    pub standard_flags: Option<Vec<String>>,
    /// Literal flag tokens passed through to this script
    #[serde(default)]
    pub supports: Vec<String>,
    #[serde(default)]
    pub positional: Vec<PositionalSpec>,
    #[serde(default, rename = "option")]
    pub options: Vec<OptionSpec>,
}

const fn default_true() -> bool {
    true
}

impl ScriptManifest {
    /// Parse a manifest from TOML text; `origin` names the source in errors
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self> {
        let manifest: Self = toml::from_str(content).map_err(|e| {
            CliparseError::manifest_with_source("invalid TOML", origin, e)
        })?;
        manifest.validate(origin)?;
        Ok(manifest)
    }

    /// Read and validate a manifest file
    #[instrument]
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = FileSystemUtils::new().read_to_string(path)?;
        Self::from_toml(&content, path)
    }

    /// Check names, tokens and option declarations
    pub fn validate(&self, origin: &Path) -> Result<()> {
        if !NAME_RE.is_match(&self.name) {
            return Err(CliparseError::manifest(
                format!("invalid script name '{}'", self.name),
                origin,
            ));
        }

        if let Some(token) = self.supports.iter().find(|token| !TOKEN_RE.is_match(token)) {
            return Err(CliparseError::manifest(
                format!("invalid flag token '{token}' in supports"),
                origin,
            ));
        }

        let standard = self
            .selected_flags()
            .map_err(|e| CliparseError::manifest_with_source("invalid standard_flags", origin, e))?;

        // Ids, long names and short names already taken by the parser itself
        let mut taken_ids: HashSet<String> = HashSet::from(["help".to_string()]);
        let mut taken_longs: HashSet<String> = HashSet::from(["help".to_string()]);
        let mut taken_shorts: HashSet<char> = HashSet::from(['h']);
        for flag in &standard {
            let spec = flag.spec();
            taken_ids.insert(spec.id.to_string());
            taken_longs.insert(spec.long.to_string());
            taken_shorts.insert(spec.short);
        }

        self.validate_positionals(&mut taken_ids, origin)?;

        for option in &self.options {
            if !NAME_RE.is_match(&option.long)
                || !taken_ids.insert(option.long.clone())
                || !taken_longs.insert(option.long.clone())
            {
                return Err(CliparseError::manifest(
                    format!("invalid or duplicate option '--{}'", option.long),
                    origin,
                ));
            }
            if let Some(short) = option.short {
                if !short.is_ascii_alphanumeric() || !taken_shorts.insert(short) {
                    return Err(CliparseError::manifest(
                        format!("invalid or duplicate short option '-{short}'"),
                        origin,
                    ));
                }
            }
            if !option.takes_value && (!option.choices.is_empty() || option.default.is_some()) {
                return Err(CliparseError::manifest(
                    format!(
                        "option '--{}' sets choices or a default but takes no value",
                        option.long
                    ),
                    origin,
                ));
            }
        }

        Ok(())
    }

    /// Names must be unique; a required positional may not follow an optional
    /// one, and only the last positional may take multiple values
    fn validate_positionals(&self, taken_ids: &mut HashSet<String>, origin: &Path) -> Result<()> {
        let mut optional: Option<&str> = None;
        let last = self.positional.len().saturating_sub(1);

        for (index, positional) in self.positional.iter().enumerate() {
            if !NAME_RE.is_match(&positional.name) || !taken_ids.insert(positional.name.clone()) {
                return Err(CliparseError::manifest(
                    format!("invalid or duplicate positional '{}'", positional.name),
                    origin,
                ));
            }

            if positional.multiple && index != last {
                return Err(CliparseError::manifest(
                    format!(
                        "positional '{}' takes multiple values but is not the last positional",
                        positional.name
                    ),
                    origin,
                ));
            }

            match (positional.required, optional) {
                (true, Some(previous)) => {
                    return Err(CliparseError::manifest(
                        format!(
                            "required positional '{}' follows optional positional '{previous}'",
                            positional.name
                        ),
                        origin,
                    ));
                }
                (false, None) => optional = Some(positional.name.as_str()),
                _ => {}
            }
        }

        Ok(())
    }

    fn selected_flags(&self) -> Result<Vec<StandardFlag>> {
        match &self.standard_flags {
            Some(ids) => ids.iter().map(|id| StandardFlag::from_id(id)).collect(),
            None => Ok(StandardFlag::ALL.to_vec()),
        }
    }

    /// Build the parser this manifest describes
    pub fn build_parser(&self) -> Result<BaseParser> {
        let mut parser = match &self.standard_flags {
            Some(ids) => BaseParser::with_standard_flags(self.name.clone(), ids)?,
            None => BaseParser::new(self.name.clone()),
        };

        if let Some(description) = &self.description {
            parser = parser.description(description.clone());
        }

        for positional in &self.positional {
            let mut arg = Arg::new(positional.name.clone()).required(positional.required);
            if positional.multiple {
                arg = arg.num_args(1..).action(ArgAction::Append);
            }
            if let Some(help) = &positional.help {
                arg = arg.help(help.clone());
            }
            parser = parser.arg(arg);
        }

        for option in &self.options {
            let mut arg = Arg::new(option.long.clone()).long(option.long.clone());
            if let Some(short) = option.short {
                arg = arg.short(short);
            }
            if let Some(help) = &option.help {
                arg = arg.help(help.clone());
            }
            if option.takes_value {
                arg = arg.action(ArgAction::Set);
                if !option.choices.is_empty() {
                    arg = arg.value_parser(PossibleValuesParser::new(option.choices.clone()));
                }
                if let Some(default) = &option.default {
                    arg = arg.default_value(default.clone());
                }
            } else {
                arg = arg.action(ArgAction::SetTrue);
            }
            parser = parser.arg(arg);
        }

        Ok(parser)
    }

    /// Register this manifest's script, tagging it with `origin`
    pub fn register(self, registry: &mut ScriptRegistry, origin: &str) {
        let description = self
            .description
            .clone()
            .unwrap_or_else(|| self.name.clone());
        let name = self.name.clone();
        let supports = self.supports.clone();
        let manifest = Arc::new(self);

        debug!("Registering manifest script {} from {}", name, origin);
        registry.register(
            ScriptDescriptor::new(
                name,
                description,
                Arc::new(move || manifest.build_parser()),
                supports,
            )
            .with_origin(origin),
        );
    }
}
