//! Command line interface for bookshelf
//!
//! Provides:
//! - one-shot commands: add, delete, find, list, status
//! - menu: the interactive numbered menu (default)
//!
//! This layer gathers input and prints results; all record management is
//! done by [`crate::library::Library`].

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod menu;

pub use args::{Cli, Command};
pub use commands::{execute, resolve_config, run, run_command};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_book, write_books};
pub use menu::Menu;
