//! Built-in scripts
//!
//! Each submodule exposes a parser factory and a `register` function; the
//! runner loads them through [`builtin_modules`].

pub mod process_fonts;
pub mod validate_fonts;

use crate::core::ScriptModule;

/// Script modules shipped with the batch runner, in load order
pub fn builtin_modules() -> Vec<ScriptModule> {
    vec![
        ScriptModule {
            name: "process_fonts",
            register: process_fonts::register,
        },
        ScriptModule {
            name: "validate_fonts",
            register: validate_fonts::register,
        },
    ]
}
