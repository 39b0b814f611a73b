//! Configuration layer for the ResMan client.
//!
//! This module provides:
//! - Code-supplied settings ([`ResManConfig`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Code-supplied values** - Non-empty fields of [`ResManConfig`]
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Timeout and base URL only
//!
//! The three credential fields have no default. They are checked in the
//! order partner id, API key, account id, and the first one missing from
//! every source is reported.
//!
//! Extra headers are merged: TOML headers first, code-supplied headers
//! replace TOML headers with the same name.

pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use error::{ConfigError, field};
pub use toml::{ClientSection, CredentialsSection, TomlConfig, default_config_template};
pub use validated::{ResManConfig, ValidatedConfig, write_default_config};

pub(crate) use validated::{parse_header_name, parse_header_value};
