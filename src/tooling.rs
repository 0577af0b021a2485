//! Tooling & Integration Layer
//!
//! Command-line entry points over the session and renderers.

pub mod cli;

pub use cli::{Cli, CliContext, Commands, FavoriteCommands};
