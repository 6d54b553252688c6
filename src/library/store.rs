//! Flat-file store for the book collection
//!
//! The store is a single UTF-8 JSON file holding an array of record
//! objects, pretty-printed with four-space indentation.
//!
//! - Absent or blank file = empty collection
//! - Anything else that is not an array of valid records is corrupt
//! - Saves rewrite the whole file; there is no temp-file rename

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::observability::{log_event_with_fields, Event};
use crate::record::Book;

use super::errors::{LibraryError, LibraryResult};

/// Default store location, relative to the working directory
pub const DEFAULT_STORE_PATH: &str = "data/books.json";

pub struct BookStore {
    path: PathBuf,
}

impl BookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record from the store, in file order.
    pub fn load(&self) -> LibraryResult<Vec<Book>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.log_loaded(0);
                return Ok(Vec::new());
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(self.corrupt(format!("not valid UTF-8: {}", e)));
            }
            Err(e) => return Err(LibraryError::io(&self.path, "read", e)),
        };

        let content = content.trim();
        if content.is_empty() {
            self.log_loaded(0);
            return Ok(Vec::new());
        }

        let value: Value = serde_json::from_str(content)
            .map_err(|e| self.corrupt(format!("invalid JSON: {}", e)))?;

        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(self.corrupt(format!(
                    "expected an array of records, found {}",
                    crate::record::json_kind(&other)
                )))
            }
        };

        let mut books = Vec::with_capacity(items.len());
        let mut seen = HashSet::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let book = Book::from_value(item).map_err(|e| {
                let err = LibraryError::corrupt_record(&self.path, index, e);
                self.log_corrupt(err.message());
                err
            })?;
            if !seen.insert(book.id) {
                return Err(self.corrupt(format!("duplicate id {} at record {}", book.id, index)));
            }
            books.push(book);
        }

        self.log_loaded(books.len());
        Ok(books)
    }

    /// Overwrites the store with `books`, in order.
    ///
    /// Creates the parent directory if it does not exist yet.
    pub fn save(&self, books: &[Book]) -> LibraryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| LibraryError::io(&self.path, "create directory for", e))?;
            }
        }

        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        books
            .serialize(&mut serializer)
            .map_err(|e| LibraryError::encode(&self.path, e))?;

        fs::write(&self.path, &buffer).map_err(|e| LibraryError::io(&self.path, "write", e))?;

        log_event_with_fields(
            Event::StoreSaved,
            &[
                ("path", &self.path.display().to_string()),
                ("records", &books.len().to_string()),
            ],
        );
        Ok(())
    }

    fn corrupt(&self, reason: String) -> LibraryError {
        let err = LibraryError::corrupt_store(&self.path, reason);
        self.log_corrupt(err.message());
        err
    }

    fn log_corrupt(&self, message: &str) {
        log_event_with_fields(
            Event::StoreCorrupt,
            &[("path", &self.path.display().to_string()), ("reason", message)],
        );
    }

    fn log_loaded(&self, count: usize) {
        log_event_with_fields(
            Event::StoreLoaded,
            &[
                ("path", &self.path.display().to_string()),
                ("records", &count.to_string()),
            ],
        );
    }
}
