//! Book records
//!
//! A `Book` is the value object stored by the library. Its shape never
//! changes after creation; only the status field is ever rewritten, and
//! only by the library.
//!
//! Records cross the persistence boundary as plain JSON objects with the
//! keys `id`, `title`, `author`, `year` and `status`.

mod book;
mod errors;

pub use book::{Book, STATUS_AVAILABLE, STATUS_CHECKED_OUT};
pub(crate) use book::json_kind;
pub use errors::{RecordError, RecordResult};
