//! Book collection management
//!
//! The `Library` owns the ordered set of books and the store file that
//! backs it.
//!
//! # Rules
//!
//! - The store is loaded exactly once, when the library is opened
//! - Every add, delete and status update rewrites the whole store
//! - Reads never write
//! - Ids are `max + 1` (or 1), so a deleted id comes back only if it
//!   was the maximum
//! - Search is exact equality over a closed set of fields

mod criteria;
mod errors;
mod manager;
mod store;

pub use criteria::{Criteria, Field};
pub use errors::{LibraryError, LibraryErrorCode, LibraryResult, Severity};
pub use manager::Library;
pub use store::{BookStore, DEFAULT_STORE_PATH};
