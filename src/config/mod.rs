//! Configuration layer for ddns-sync.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Environment variable capture ([`EnvConfig`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved field by field with the following
//! priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **Environment variables** - `DDNS_SYNC_*` values
//! 3. **TOML config file** - Values from the configuration file
//! 4. **Built-in defaults** - Hardcoded default values
//!
//! Required fields without defaults (`api_token`, `zone_id`, and one record
//! selection source) must be present in at least one source or startup
//! fails before the first pass.
//!
//! # Record Selection Precedence
//!
//! The two selection fields (`comment_key`, `domains_file`) are merged
//! through the source priority independently. If a comment key is present
//! after merging, selection runs by comment and any configured domains file
//! is ignored; otherwise a domains file selects by manifest. With neither,
//! startup fails.

mod cli;
pub mod defaults;
mod env;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use env::EnvConfig;
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
