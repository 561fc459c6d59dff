//! Core functionality for script coordination
//!
//! Contains the standard flag catalog, the parser facade, the script
//! registry and the coordinator that filters one command line per script.

pub mod coordinator;
pub mod filter;
pub mod flags;
pub mod manifest;
pub mod parser;
pub mod registry;
pub mod results;

pub use coordinator::{Coordinator, ScriptModule};
pub use filter::{filter_args, looks_like_flag};
pub use flags::{FlagSpec, StandardFlag};
pub use manifest::ScriptManifest;
pub use parser::{BaseParser, ParseOutcome, ParsedArgs, create_parser};
pub use registry::{ParserFactory, ScriptDescriptor, ScriptRegistry, register_script};
pub use results::{BatchResults, ExecutionResult};
