//! Library error types
//!
//! Error codes:
//! - BOOK_CORRUPT_STORE (FATAL)
//! - BOOK_MALFORMED_RECORD (REJECT)
//! - BOOK_INVALID_CRITERIA (REJECT)
//! - BOOK_IO_FAILED (FATAL)
//! - BOOK_ID_EXHAUSTED (REJECT)

use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::record::RecordError;

/// Severity levels for library errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The request is refused; library state is unchanged
    Reject,
    /// In-memory state and the store can no longer be trusted together
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryErrorCode {
    /// Store file exists but is not a valid array of records
    CorruptStore,
    /// A single record representation is invalid
    MalformedRecord,
    /// Search named a field that books do not have
    InvalidCriteria,
    /// Reading or writing the store failed
    Io,
    /// The highest id in use leaves no larger id to assign
    IdExhausted,
}

impl LibraryErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            LibraryErrorCode::CorruptStore => "BOOK_CORRUPT_STORE",
            LibraryErrorCode::MalformedRecord => "BOOK_MALFORMED_RECORD",
            LibraryErrorCode::InvalidCriteria => "BOOK_INVALID_CRITERIA",
            LibraryErrorCode::Io => "BOOK_IO_FAILED",
            LibraryErrorCode::IdExhausted => "BOOK_ID_EXHAUSTED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            LibraryErrorCode::CorruptStore | LibraryErrorCode::Io => Severity::Fatal,
            LibraryErrorCode::MalformedRecord
            | LibraryErrorCode::InvalidCriteria
            | LibraryErrorCode::IdExhausted => Severity::Reject,
        }
    }
}

impl fmt::Display for LibraryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Library error with full context
#[derive(Debug)]
pub struct LibraryError {
    code: LibraryErrorCode,
    message: String,
    /// Store path if the error concerns the store
    path: Option<PathBuf>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl LibraryError {
    fn new(code: LibraryErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    fn at(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    fn caused_by(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Store content is structurally invalid
    pub fn corrupt_store(path: &Path, reason: impl Into<String>) -> Self {
        Self::new(
            LibraryErrorCode::CorruptStore,
            format!("Corrupt store '{}': {}", path.display(), reason.into()),
        )
        .at(path)
    }

    /// A record inside the store failed validation
    pub fn corrupt_record(path: &Path, index: usize, err: RecordError) -> Self {
        Self::new(
            LibraryErrorCode::CorruptStore,
            format!(
                "Corrupt store '{}': record {}: {}",
                path.display(),
                index,
                err
            ),
        )
        .at(path)
        .caused_by(LibraryError::malformed_record(err))
    }

    /// A standalone record representation is invalid
    pub fn malformed_record(err: RecordError) -> Self {
        Self::new(LibraryErrorCode::MalformedRecord, format!("Malformed record: {}", err))
            .caused_by(err)
    }

    /// Search criteria name an unknown field
    pub fn invalid_criteria(field: impl Into<String>) -> Self {
        Self::new(
            LibraryErrorCode::InvalidCriteria,
            format!(
                "Unknown search field '{}' (expected one of: id, title, author, year, status)",
                field.into()
            ),
        )
    }

    /// Search value cannot be used for the field
    pub fn invalid_criteria_value(field: &str, reason: impl Into<String>) -> Self {
        Self::new(
            LibraryErrorCode::InvalidCriteria,
            format!("Invalid value for search field '{}': {}", field, reason.into()),
        )
    }

    /// No id greater than `max_id` fits in an i64
    pub fn id_exhausted(max_id: i64) -> Self {
        Self::new(
            LibraryErrorCode::IdExhausted,
            format!("Cannot assign an id after {}: id space exhausted", max_id),
        )
    }

    /// Store I/O failed
    pub fn io(path: &Path, action: &str, err: io::Error) -> Self {
        Self::new(
            LibraryErrorCode::Io,
            format!("Failed to {} store '{}': {}", action, path.display(), err),
        )
        .at(path)
        .caused_by(err)
    }

    /// Store contents could not be encoded
    pub fn encode(path: &Path, err: serde_json::Error) -> Self {
        Self::new(
            LibraryErrorCode::Io,
            format!("Failed to encode store '{}': {}", path.display(), err),
        )
        .at(path)
        .caused_by(err)
    }

    pub fn code(&self) -> LibraryErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the store path if applicable
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl Error for LibraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Result type for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;
