//! The library: an owned, ordered book collection backed by a store file

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::observability::{log_event_with_fields, Event};
use crate::record::Book;

use super::criteria::Criteria;
use super::errors::{LibraryError, LibraryResult};
use super::store::BookStore;

/// Owns the book collection and keeps the store in sync with it.
///
/// The store is read once, in [`Library::open`], and rewritten in full after
/// every mutation. Reads never touch the disk.
pub struct Library {
    store: BookStore,
    /// Insertion order = load order followed by creation order
    books: Vec<Book>,
}

impl Library {
    /// Opens the library, loading every record from `store_path`.
    ///
    /// An absent or blank store yields an empty library. A corrupt store
    /// fails the open.
    pub fn open(store_path: impl Into<PathBuf>) -> LibraryResult<Self> {
        let store = BookStore::new(store_path);
        let books = store.load()?;
        Ok(Self { store, books })
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// All books, in order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Highest id in use plus one, or 1 when empty
    fn next_id(&self) -> LibraryResult<i64> {
        match self.books.iter().map(|book| book.id).max() {
            Some(max) => max.checked_add(1).ok_or_else(|| LibraryError::id_exhausted(max)),
            None => Ok(1),
        }
    }

    /// Adds a new `available` book and saves.
    ///
    /// Fails with `IdExhausted`, leaving the library untouched, when the
    /// highest id in use is `i64::MAX`.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
    ) -> LibraryResult<Book> {
        let id = self.next_id()?;
        let snapshot = self.books.clone();
        let book = Book::new(id, title, author, year);
        self.books.push(book.clone());
        self.commit(snapshot)?;

        log_event_with_fields(
            Event::BookAdded,
            &[
                ("author", &book.author),
                ("id", &book.id.to_string()),
                ("title", &book.title),
                ("year", &book.year.to_string()),
            ],
        );
        Ok(book)
    }

    /// Removes the book with `id` if present, then saves.
    ///
    /// An unknown id is not an error; the store is still rewritten.
    pub fn delete(&mut self, id: i64) -> LibraryResult<()> {
        let snapshot = self.books.clone();
        self.books.retain(|book| book.id != id);
        let removed = snapshot.len() != self.books.len();

        self.commit(snapshot)?;

        let id = id.to_string();
        if removed {
            log_event_with_fields(Event::BookDeleted, &[("id", &id)]);
        } else {
            log_event_with_fields(Event::BookNotFound, &[("id", &id), ("op", "delete")]);
        }
        Ok(())
    }

    /// Returns every book matching all `criteria` entries exactly.
    ///
    /// Keys must be `id`, `title`, `author`, `year` or `status`. An empty
    /// mapping returns the whole collection.
    pub fn find(&self, criteria: &Map<String, Value>) -> LibraryResult<Vec<Book>> {
        let criteria = Criteria::from_map(criteria).map_err(|e| {
            log_event_with_fields(Event::CriteriaRejected, &[("reason", e.message())]);
            e
        })?;
        Ok(self.select(&criteria))
    }

    /// Returns every book matching already-validated criteria.
    pub fn select(&self, criteria: &Criteria) -> Vec<Book> {
        let found: Vec<Book> = self
            .books
            .iter()
            .filter(|book| criteria.matches(book))
            .cloned()
            .collect();

        log_event_with_fields(
            Event::SearchExecuted,
            &[
                ("matched", &found.len().to_string()),
                ("terms", &criteria.len().to_string()),
            ],
        );
        found
    }

    /// Overwrites the status of the book with `id`, then saves.
    ///
    /// An unknown id is not an error; the store is still rewritten. The
    /// status value is stored as given.
    pub fn update_status(&mut self, id: i64, status: impl Into<String>) -> LibraryResult<()> {
        let status = status.into();
        let snapshot = self.books.clone();
        let updated = match self.books.iter_mut().find(|book| book.id == id) {
            Some(book) => {
                book.status = status.clone();
                true
            }
            None => false,
        };

        self.commit(snapshot)?;

        let id = id.to_string();
        if updated {
            log_event_with_fields(Event::StatusUpdated, &[("id", &id), ("status", &status)]);
        } else {
            log_event_with_fields(Event::BookNotFound, &[("id", &id), ("op", "update_status")]);
        }
        Ok(())
    }

    /// Writes the full collection to the store.
    pub fn save(&self) -> LibraryResult<()> {
        self.store.save(&self.books)
    }

    /// Saves after a mutation, restoring `snapshot` in memory if the save
    /// fails so a failed operation leaves no trace.
    fn commit(&mut self, snapshot: Vec<Book>) -> LibraryResult<()> {
        if let Err(e) = self.save() {
            self.books = snapshot;
            return Err(e);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("store", &self.store.path())
            .field("books", &self.books.len())
            .finish()
    }
}
