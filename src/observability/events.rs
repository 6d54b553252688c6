//! Observable events
//!
//! Every log line names one of these events. Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Session
    /// Command line session begins
    SessionStart,
    /// Command line session ends
    SessionEnd,
    /// Configuration loaded
    ConfigLoaded,

    // Store
    /// Store file read at startup
    StoreLoaded,
    /// Store file rewritten
    StoreSaved,
    /// Store file could not be parsed (FATAL)
    StoreCorrupt,

    // Mutations
    /// New book appended
    BookAdded,
    /// Book removed
    BookDeleted,
    /// Delete or status update named an id that does not exist
    BookNotFound,
    /// Book status overwritten
    StatusUpdated,

    // Reads
    /// Search completed
    SearchExecuted,
    /// Search named an unknown field
    CriteriaRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SessionStart => "SESSION_START",
            Event::SessionEnd => "SESSION_END",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreLoaded => "STORE_LOADED",
            Event::StoreSaved => "STORE_SAVED",
            Event::StoreCorrupt => "STORE_CORRUPT",
            Event::BookAdded => "BOOK_ADDED",
            Event::BookDeleted => "BOOK_DELETED",
            Event::BookNotFound => "BOOK_NOT_FOUND",
            Event::StatusUpdated => "STATUS_UPDATED",
            Event::SearchExecuted => "SEARCH_EXECUTED",
            Event::CriteriaRejected => "CRITERIA_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::StoreCorrupt => Severity::Fatal,
            Event::BookNotFound | Event::CriteriaRejected => Severity::Warn,
            Event::StoreSaved | Event::SearchExecuted => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
