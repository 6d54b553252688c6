//! bookshelf - a small book catalog persisted to a flat JSON file
//!
//! The core is [`library::Library`], which owns the books and keeps the
//! store file in sync. [`cli`] is the command line and interactive menu
//! that drive it.

pub mod cli;
pub mod library;
pub mod observability;
pub mod record;
