//! Analysis configuration for the `analyze` command.
//!
//! Values are merged with the precedence CLI flag > `--set KEY=VALUE` > TOML file >
//! built-in defaults.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
