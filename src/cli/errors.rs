//! CLI-specific error types

use std::error::Error;
use std::fmt;
use std::io;

use crate::library::{LibraryError, LibraryErrorCode};

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// User input could not be used; the session continues
    InvalidInput,
    /// Error raised by the library itself
    Library(LibraryErrorCode),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "BOOK_CLI_CONFIG_ERROR",
            Self::IoError => "BOOK_CLI_IO_ERROR",
            Self::InvalidInput => "BOOK_CLI_INVALID_INPUT",
            Self::Library(code) => code.code(),
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    fn caused_by(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Unusable user input
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the interactive session must stop.
    ///
    /// Rejected input and rejected searches are reported and the menu
    /// carries on; everything else ends the session.
    pub fn is_fatal(&self) -> bool {
        match &self.code {
            CliErrorCode::InvalidInput => false,
            CliErrorCode::Library(code) => {
                code.severity() == crate::library::Severity::Fatal
            }
            CliErrorCode::ConfigError | CliErrorCode::IoError => true,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string()).caused_by(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e)).caused_by(e)
    }
}

impl From<LibraryError> for CliError {
    fn from(e: LibraryError) -> Self {
        let message = e.message().to_string();
        Self::new(CliErrorCode::Library(e.code()), message).caused_by(e)
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordError;

    #[test]
    fn test_library_code_passes_through() {
        let err = CliError::from(LibraryError::invalid_criteria("isbn"));
        assert_eq!(err.code_str(), "BOOK_INVALID_CRITERIA");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_corrupt_store_is_fatal() {
        let err = CliError::from(LibraryError::corrupt_store(
            std::path::Path::new("books.json"),
            "expected an array of records, found object",
        ));
        assert!(err.is_fatal());
        assert!(err.to_string().starts_with("BOOK_CORRUPT_STORE: "));
    }

    #[test]
    fn test_library_source_chain_kept() {
        let err = CliError::from(LibraryError::corrupt_record(
            std::path::Path::new("books.json"),
            1,
            RecordError::MissingField("year"),
        ));
        assert_eq!(err.code_str(), "BOOK_CORRUPT_STORE");

        let library_err = err.source().unwrap().downcast_ref::<LibraryError>().unwrap();
        assert_eq!(library_err.code(), LibraryErrorCode::CorruptStore);

        let inner = library_err.source().unwrap().downcast_ref::<LibraryError>().unwrap();
        assert_eq!(inner.code(), LibraryErrorCode::MalformedRecord);
    }

    #[test]
    fn test_io_error_kept_as_source() {
        let err = CliError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        let source = err.source().unwrap().downcast_ref::<io::Error>().unwrap();
        assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_invalid_input_is_not_fatal() {
        assert!(!CliError::invalid_input("year must be an integer").is_fatal());
        assert!(CliError::config_error("bad").is_fatal());
    }
}
