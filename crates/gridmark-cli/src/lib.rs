//! Gridmark CLI library.
//!
//! This library provides the terminal front end for the relation grid:
//! configuration management, puzzle and events files, grid rendering,
//! command execution and the interactive REPL.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod puzzle;
pub mod render;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
