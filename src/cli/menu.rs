//! Interactive numbered menu
//!
//! Reads one answer per line. End of input ends the session as if `0` had
//! been chosen. Bad answers are reported and the menu is shown again.

use std::io::{BufRead, Write};

use crate::library::{Criteria, Field, Library};
use crate::record::{STATUS_AVAILABLE, STATUS_CHECKED_OUT};

use super::errors::{CliError, CliResult};
use super::io::write_book;

const MENU: &str = "\
Menu:
1. Add a book
2. Delete a book
3. Find books
4. List all books
5. Change book status
0. Exit";

pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs until the user exits or input ends.
    ///
    /// Non-fatal errors are printed and the loop continues; fatal ones
    /// (store I/O failures) end the session with the error.
    pub fn run(&mut self, library: &mut Library) -> CliResult<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", MENU)?;

            let choice = match self.prompt("Choose an action: ")? {
                Some(choice) => choice,
                None => break,
            };

            let result = match choice.trim() {
                "1" => self.add(library),
                "2" => self.delete(library),
                "3" => self.find(library),
                "4" => self.list(library),
                "5" => self.update_status(library),
                "0" => {
                    writeln!(self.output, "Goodbye.")?;
                    break;
                }
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    Ok(())
                }
            };

            if let Err(e) = result {
                if e.is_fatal() {
                    return Err(e);
                }
                writeln!(self.output, "Error: {}", e.message())?;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Prints `label` and reads one line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some(line))
    }

    fn prompt_int(&mut self, label: &str, what: &str) -> CliResult<Option<i64>> {
        match self.prompt(label)? {
            Some(text) => text.trim().parse::<i64>().map(Some).map_err(|_| {
                CliError::invalid_input(format!("{} must be an integer, got '{}'", what, text))
            }),
            None => Ok(None),
        }
    }

    fn add(&mut self, library: &mut Library) -> CliResult<()> {
        let Some(title) = self.prompt("Title: ")? else {
            return Ok(());
        };
        let Some(author) = self.prompt("Author: ")? else {
            return Ok(());
        };
        let Some(year) = self.prompt_int("Year: ", "Year")? else {
            return Ok(());
        };

        let book = library.add(title, author, year)?;
        writeln!(self.output, "Book added with id {}.", book.id)?;
        Ok(())
    }

    fn delete(&mut self, library: &mut Library) -> CliResult<()> {
        let Some(id) = self.prompt_int("Id of the book to delete: ", "Id")? else {
            return Ok(());
        };

        let existed = library.get(id).is_some();
        library.delete(id)?;
        if existed {
            writeln!(self.output, "Book deleted.")?;
        } else {
            writeln!(self.output, "No book with id {}.", id)?;
        }
        Ok(())
    }

    fn find(&mut self, library: &Library) -> CliResult<()> {
        let Some(name) = self.prompt("Search field (id, title, author, year, status): ")? else {
            return Ok(());
        };
        let field = Field::parse(name.trim())?;
        let Some(text) = self.prompt("Value: ")? else {
            return Ok(());
        };
        let value = field.value_from_text(&text)?;

        let found = library.select(&Criteria::new().with(field, value));
        if found.is_empty() {
            writeln!(self.output, "No books found.")?;
        }
        for book in &found {
            write_book(&mut self.output, book)?;
        }
        Ok(())
    }

    fn list(&mut self, library: &Library) -> CliResult<()> {
        if library.is_empty() {
            writeln!(self.output, "The library is empty.")?;
        }
        for book in library.books() {
            write_book(&mut self.output, book)?;
        }
        Ok(())
    }

    fn update_status(&mut self, library: &mut Library) -> CliResult<()> {
        let Some(id) = self.prompt_int("Id of the book: ", "Id")? else {
            return Ok(());
        };
        let label = format!("New status ({}/{}): ", STATUS_AVAILABLE, STATUS_CHECKED_OUT);
        let Some(status) = self.prompt(&label)? else {
            return Ok(());
        };
        let status = status.trim();
        if status != STATUS_AVAILABLE && status != STATUS_CHECKED_OUT {
            return Err(CliError::invalid_input(format!(
                "status must be '{}' or '{}', got '{}'",
                STATUS_AVAILABLE, STATUS_CHECKED_OUT, status
            )));
        }

        let existed = library.get(id).is_some();
        library.update_status(id, status)?;
        if existed {
            writeln!(self.output, "Status updated.")?;
        } else {
            writeln!(self.output, "No book with id {}.", id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_menu(library: &mut Library, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(Cursor::new(script.as_bytes()), &mut output)
            .run(library)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn open(dir: &TempDir) -> Library {
        Library::open(dir.path().join("books.json")).unwrap()
    }

    #[test]
    fn test_exit_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);
        let output = run_menu(&mut library, "0\n");
        assert!(output.contains("Goodbye."));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);
        run_menu(&mut library, "");
    }

    #[test]
    fn test_add_then_list() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);

        let output = run_menu(&mut library, "1\nDune\nFrank Herbert\n1965\n4\n0\n");

        assert!(output.contains("Book added with id 1."));
        assert!(output.contains(r#""title":"Dune""#));
        assert_eq!(library.len(), 1);
        assert_eq!(library.books()[0].author, "Frank Herbert");
    }

    #[test]
    fn test_bad_year_keeps_session_alive() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);

        let output = run_menu(&mut library, "1\nDune\nHerbert\nsoon\n0\n");

        assert!(output.contains("Error: Year must be an integer"));
        assert!(output.contains("Goodbye."));
        assert!(library.is_empty());
    }

    #[test]
    fn test_find_by_year_parses_integer() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);
        library.add("Dune", "Herbert", 1965).unwrap();
        library.add("Emma", "Austen", 1815).unwrap();

        let output = run_menu(&mut library, "3\nyear\n1965\n0\n");

        assert!(output.contains(r#""title":"Dune""#));
        assert!(!output.contains(r#""title":"Emma""#));
    }

    #[test]
    fn test_find_unknown_field_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);

        let output = run_menu(&mut library, "3\npublisher\n0\n");

        assert!(output.contains("Unknown search field 'publisher'"));
    }

    #[test]
    fn test_change_status_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);
        library.add("Dune", "Herbert", 1965).unwrap();
        library.add("Emma", "Austen", 1815).unwrap();

        let output = run_menu(&mut library, "5\n2\nchecked-out\n2\n1\n2\n42\n0\n");

        assert!(output.contains("Status updated."));
        assert!(output.contains("Book deleted."));
        assert!(output.contains("No book with id 42."));
        assert_eq!(library.len(), 1);
        assert_eq!(library.books()[0].status, STATUS_CHECKED_OUT);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);
        library.add("Dune", "Herbert", 1965).unwrap();

        let output = run_menu(&mut library, "5\n1\nlost\n0\n");

        assert!(output.contains("Error: status must be"));
        assert_eq!(library.books()[0].status, STATUS_AVAILABLE);
    }

    #[test]
    fn test_invalid_choice() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);
        let output = run_menu(&mut library, "9\n0\n");
        assert!(output.contains("Invalid choice."));
    }
}
