//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf add <TITLE> <AUTHOR> <YEAR>
//! - bookshelf delete <ID>
//! - bookshelf find [--id] [--title] [--author] [--year] [--status]
//! - bookshelf list
//! - bookshelf status <ID> <STATUS>
//! - bookshelf menu (default)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::library::{Criteria, Field};
use crate::record::{STATUS_AVAILABLE, STATUS_CHECKED_OUT};

/// bookshelf - a small book catalog kept in a JSON file
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file [default: ./bookshelf.json if present]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store file, overriding the configuration
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Log level (trace, info, warn, error, fatal), overriding the configuration
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a book and print it
    Add {
        title: String,
        author: String,
        /// Publication year
        #[arg(allow_negative_numbers = true)]
        year: i64,
    },

    /// Delete a book by id
    Delete { id: i64 },

    /// Print books matching every given field exactly
    Find {
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        year: Option<i64>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Print every book
    List,

    /// Change the status of a book
    Status {
        id: i64,
        #[arg(value_parser = [STATUS_AVAILABLE, STATUS_CHECKED_OUT])]
        status: String,
    },

    /// Run the interactive menu
    Menu,
}

impl Command {
    /// Search criteria for `find`; empty for every other command.
    pub fn criteria(&self) -> Criteria {
        let mut criteria = Criteria::new();
        if let Command::Find {
            id,
            title,
            author,
            year,
            status,
        } = self
        {
            if let Some(id) = id {
                criteria = criteria.with(Field::Id, *id);
            }
            if let Some(title) = title {
                criteria = criteria.with(Field::Title, title.as_str());
            }
            if let Some(author) = author {
                criteria = criteria.with(Field::Author, author.as_str());
            }
            if let Some(year) = year {
                criteria = criteria.with(Field::Year, *year);
            }
            if let Some(status) = status {
                criteria = criteria.with(Field::Status, status.as_str());
            }
        }
        criteria
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
