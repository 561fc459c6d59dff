//! Script registry
//!
//! Maps script names to descriptors in registration order. A registry is an
//! ordinary value: whoever builds the coordinator owns it, and tests create a
//! fresh one or call [`ScriptRegistry::clear`].

use crate::{core::parser::BaseParser, error::Result};
use indexmap::IndexMap;
use std::{collections::BTreeSet, fmt, sync::Arc};
use tracing::debug;

/// Zero-argument function producing a fresh parser for a script
pub type ParserFactory = Arc<dyn Fn() -> Result<BaseParser> + Send + Sync>;

/// Immutable description of a registered script
#[derive(Clone)]
pub struct ScriptDescriptor {
    name: String,
    description: String,
    factory: ParserFactory,
    supported_flags: BTreeSet<String>,
    origin: Option<String>,
}

impl ScriptDescriptor {
    /// Create a descriptor
    pub fn new<I, S>(
        name: impl Into<String>,
        description: impl Into<String>,
        factory: ParserFactory,
        supported_flags: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            factory,
            supported_flags: supported_flags.into_iter().map(Into::into).collect(),
            origin: None,
        }
    }

    /// Record where the script came from (module name or manifest path)
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared flag tokens, sorted
    pub fn supported_flags(&self) -> &BTreeSet<String> {
        &self.supported_flags
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Whether the script declares this literal flag token
    pub fn supports_flag(&self, flag: &str) -> bool {
        self.supported_flags.contains(flag)
    }

    /// Build a fresh parser instance
    pub fn build_parser(&self) -> Result<BaseParser> {
        (self.factory)()
    }
}

impl fmt::Debug for ScriptDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("supported_flags", &self.supported_flags)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Registry of scripts keyed by name
#[derive(Debug, Clone, Default)]
pub struct ScriptRegistry {
    scripts: IndexMap<String, ScriptDescriptor>,
}

impl ScriptRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor; an existing entry with the same name is replaced
    /// in place, keeping its position in the listing order
    pub fn register(&mut self, descriptor: ScriptDescriptor) {
        let name = descriptor.name.clone();
        if self.scripts.insert(name.clone(), descriptor).is_some() {
            debug!("Replaced registered script: {}", name);
        } else {
            debug!("Registered script: {}", name);
        }
    }

    /// Look up a script by name
    pub fn get(&self, name: &str) -> Option<&ScriptDescriptor> {
        self.scripts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    /// Registered names in registration order
    pub fn list_all(&self) -> Vec<String> {
        self.scripts.keys().cloned().collect()
    }

    /// All descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ScriptDescriptor> {
        self.scripts.values()
    }

    /// Snapshot of every registration
    pub fn get_all(&self) -> IndexMap<String, ScriptDescriptor> {
        self.scripts.clone()
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Remove every registration
    pub fn clear(&mut self) {
        debug!("Clearing {} registered script(s)", self.scripts.len());
        self.scripts.clear();
    }
}

/// Register a parser factory under `name` and hand the factory back unchanged
///
/// When `description` is `None` the factory is invoked once to read the
/// parser's own description, falling back to the script name; an error from
/// that call aborts the registration.
pub fn register_script<F, I, S>(
    registry: &mut ScriptRegistry,
    name: &str,
    description: Option<&str>,
    supports: I,
    factory: F,
) -> Result<F>
where
    F: Fn() -> Result<BaseParser> + Clone + Send + Sync + 'static,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let description = match description {
        Some(description) => description.to_string(),
        None => factory()?
            .get_description()
            .map_or_else(|| name.to_string(), str::to_string),
    };

    registry.register(ScriptDescriptor::new(
        name,
        description,
        Arc::new(factory.clone()),
        supports,
    ));

    Ok(factory)
}
