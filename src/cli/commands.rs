//! CLI command implementations
//!
//! Every command follows the same sequence:
//! 1. Resolve configuration (file, then flag overrides)
//! 2. Apply the log level
//! 3. Open the library (loads the store once)
//! 4. Run one command, or the interactive menu

use std::io::{self, BufRead, Write};

use crate::library::Library;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};

use super::args::{Cli, Command};
use super::config::{Config, DEFAULT_CONFIG_PATH};
use super::errors::CliResult;
use super::io::{write_book, write_books};
use super::menu::Menu;

/// Parse arguments and run against the process stdin/stdout
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    execute(cli, stdin.lock(), &mut stdout)
}

/// Builds the effective configuration for `cli`.
pub fn resolve_config(cli: &Cli) -> CliResult<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH.as_ref())?,
    };

    if let Some(store) = &cli.store {
        config.store_path = store.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

/// Run a parsed command line with explicit input and output streams
pub fn execute<R: BufRead, W: Write>(cli: Cli, input: R, output: &mut W) -> CliResult<()> {
    let config = resolve_config(&cli)?;
    Logger::set_min_severity(config.log_severity()?);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("log_level", &config.log_level),
            ("store_path", &config.store_path().display().to_string()),
        ],
    );

    let mut library = Library::open(config.store_path())?;

    log_event(Event::SessionStart);
    run_command(cli.command.unwrap_or(Command::Menu), &mut library, input, output)?;
    log_event(Event::SessionEnd);
    Ok(())
}

/// Dispatch one command against an open library
pub fn run_command<R: BufRead, W: Write>(
    command: Command,
    library: &mut Library,
    input: R,
    output: &mut W,
) -> CliResult<()> {
    match command {
        Command::Add {
            title,
            author,
            year,
        } => {
            let book = library.add(title, author, year)?;
            write_book(output, &book)?;
            output.flush()?;
        }
        Command::Delete { id } => library.delete(id)?,
        Command::Find { .. } => {
            let found = library.select(&command.criteria());
            write_books(output, &found)?;
        }
        Command::List => write_books(output, library.books())?,
        Command::Status { id, status } => library.update_status(id, status)?,
        Command::Menu => Menu::new(input, output).run(library)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::Value;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    fn run_args(store: &Path, args: &[&str]) -> CliResult<String> {
        let store = store.display().to_string();
        let mut argv = vec!["bookshelf", "--store", store.as_str()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();

        let mut output = Vec::new();
        execute(cli, Cursor::new(Vec::new()), &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    fn ids(output: &str) -> Vec<i64> {
        output
            .lines()
            .map(|line| serde_json::from_str::<Value>(line).unwrap()["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_add_prints_new_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = temp_dir.path().join("books.json");

        let output = run_args(&store, &["add", "A", "B", "2000"]).unwrap();

        let record: Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(
            record,
            serde_json::json!({
                "id": 1, "title": "A", "author": "B", "year": 2000, "status": "available"
            })
        );
    }

    #[test]
    fn test_commands_share_the_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = temp_dir.path().join("books.json");

        run_args(&store, &["add", "A", "B", "2000"]).unwrap();
        run_args(&store, &["add", "C", "B", "2001"]).unwrap();
        run_args(&store, &["status", "2", "checked-out"]).unwrap();
        run_args(&store, &["delete", "1"]).unwrap();

        let listed = run_args(&store, &["list"]).unwrap();
        assert_eq!(ids(&listed), vec![2]);

        let found = run_args(&store, &["find", "--status", "checked-out"]).unwrap();
        assert_eq!(ids(&found), vec![2]);
    }

    #[test]
    fn test_find_without_flags_lists_everything() {
        let temp_dir = TempDir::new().unwrap();
        let store = temp_dir.path().join("books.json");
        run_args(&store, &["add", "A", "B", "2000"]).unwrap();
        run_args(&store, &["add", "C", "D", "2001"]).unwrap();

        let found = run_args(&store, &["find"]).unwrap();
        assert_eq!(ids(&found), vec![1, 2]);
    }

    #[test]
    fn test_corrupt_store_fails_command() {
        let temp_dir = TempDir::new().unwrap();
        let store = temp_dir.path().join("books.json");
        std::fs::write(&store, "\"not a list\"").unwrap();

        let err = run_args(&store, &["list"]).unwrap_err();
        assert_eq!(err.code_str(), "BOOK_CORRUPT_STORE");
    }

    #[test]
    fn test_config_file_sets_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = temp_dir.path().join("shelf.json");
        let config_path = temp_dir.path().join("bookshelf.json");
        std::fs::write(
            &config_path,
            serde_json::json!({ "store_path": store, "log_level": "error" }).to_string(),
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "bookshelf",
            "--config",
            config_path.to_str().unwrap(),
            "add",
            "A",
            "B",
            "2000",
        ])
        .unwrap();
        let mut output = Vec::new();
        execute(cli, Cursor::new(Vec::new()), &mut output).unwrap();

        assert!(store.exists());
    }

    #[test]
    fn test_store_flag_overrides_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bookshelf.json");
        std::fs::write(&config_path, r#"{"store_path": "from-config.json"}"#).unwrap();

        let cli = Cli::try_parse_from([
            "bookshelf",
            "--config",
            config_path.to_str().unwrap(),
            "--store",
            "from-flag.json",
            "list",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.store_path(), Path::new("from-flag.json"));
    }

    #[test]
    fn test_menu_runs_on_given_input() {
        let temp_dir = TempDir::new().unwrap();
        let store = temp_dir.path().join("books.json");
        let cli = Cli::try_parse_from(["bookshelf", "--store", store.to_str().unwrap()]).unwrap();

        let mut output = Vec::new();
        execute(cli, Cursor::new(b"1\nA\nB\n2000\n0\n".to_vec()), &mut output).unwrap();

        let reopened = Library::open(&store).unwrap();
        assert_eq!(reopened.len(), 1);
    }
}
